use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::types::CategoryId;

/// Top-level categories arrive with `parentId` set to `null`, omitted, or `""`.
fn parent_id_or_root<'de, D>(deserializer: D) -> Result<Option<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| CategoryId::new(value).ok()))
}

/// Category as returned by the catalog API, referencing its parent by id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryRecord {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "ten")]
    pub name: String,
    /// `None` for top-level categories.
    #[serde(rename = "parentId", default, deserialize_with = "parent_id_or_root")]
    pub parent_id: Option<CategoryId>,
}

impl CategoryRecord {
    #[must_use]
    pub fn new(id: CategoryId, name: impl Into<String>, parent_id: Option<CategoryId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }
}

/// Category with its children attached, in the order they were received.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct CategoryNode {
    #[serde(rename = "_id")]
    pub id: CategoryId,
    #[serde(rename = "ten")]
    pub name: String,
    #[serde(rename = "parentId")]
    pub parent_id: Option<CategoryId>,
    pub children: Vec<CategoryNode>,
}

impl From<&CategoryRecord> for CategoryNode {
    fn from(record: &CategoryRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            parent_id: record.parent_id.clone(),
            children: Vec::new(),
        }
    }
}

impl CategoryNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::subtree_len)
            .sum::<usize>()
    }
}

/// Output of a tree build: the requested forest plus the records that could
/// not be attached because their parent chain ends at an id missing from the
/// input.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct CategoryForest {
    pub roots: Vec<CategoryNode>,
    pub orphans: Vec<CategoryRecord>,
}

impl CategoryForest {
    /// Total number of nodes attached to the forest (orphans excluded).
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CategoryNode::subtree_len).sum()
    }

    pub fn has_orphans(&self) -> bool {
        !self.orphans.is_empty()
    }

    /// Depth-first pre-order walk returning each node with its depth.
    pub fn flatten(&self) -> Vec<(&CategoryNode, usize)> {
        fn collect<'a>(
            nodes: &'a [CategoryNode],
            depth: usize,
            result: &mut Vec<(&'a CategoryNode, usize)>,
        ) {
            for node in nodes {
                result.push((node, depth));
                collect(&node.children, depth + 1, result);
            }
        }

        let mut result = Vec::with_capacity(self.node_count());
        collect(&self.roots, 0, &mut result);
        result
    }
}
