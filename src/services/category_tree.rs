//! Reconstruction of the category forest from the flat list served by the API.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::category::{CategoryForest, CategoryNode, CategoryRecord};
use crate::domain::types::CategoryId;
use crate::repository::CategoryReader;
use crate::services::ServiceResult;

fn join_ids(ids: &[CategoryId]) -> String {
    ids.iter()
        .map(CategoryId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Structural problems that prevent building a well-formed forest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Parent references loop back onto themselves; ids are listed in
    /// child-to-parent order starting from the first node found on the loop.
    #[error("parent references form a cycle: {}", join_ids(.0))]
    Cycle(Vec<CategoryId>),
    #[error("duplicate category id: {0}")]
    DuplicateId(CategoryId),
    #[error("category {0} has a blank name")]
    BlankName(CategoryId),
    /// Records cut off from the forest by a missing parent, directly or
    /// through one of their ancestors.
    #[error("categories detached by missing parents: {}", join_ids(.0))]
    Orphans(Vec<CategoryId>),
}

/// What to do with records whose parent chain ends at a missing id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrphanPolicy {
    /// Leave them out of the tree and list them in [`CategoryForest::orphans`].
    #[default]
    Report,
    /// Fail the build with [`TreeError::Orphans`].
    Reject,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

/// Follows parent links from every record, failing on the first loop.
///
/// Each record is marked done once its chain has been walked, so the whole
/// pass is linear in the number of records.
fn detect_cycle(
    records: &[CategoryRecord],
    positions: &HashMap<&str, usize>,
) -> Result<(), TreeError> {
    let mut marks = vec![Mark::Unvisited; records.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..records.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }

        path.clear();
        let mut current = Some(start);

        while let Some(idx) = current {
            match marks[idx] {
                Mark::Done => break,
                Mark::OnPath => {
                    let from = path.iter().position(|&i| i == idx).unwrap_or(0);
                    let ids = path[from..]
                        .iter()
                        .map(|&i| records[i].id.clone())
                        .collect();
                    return Err(TreeError::Cycle(ids));
                }
                Mark::Unvisited => {
                    marks[idx] = Mark::OnPath;
                    path.push(idx);
                    current = records[idx]
                        .parent_id
                        .as_ref()
                        .and_then(|parent| positions.get(parent.as_str()).copied());
                }
            }
        }

        for &idx in &path {
            marks[idx] = Mark::Done;
        }
    }

    Ok(())
}

/// Flags every record whose ancestor chain runs into an id that is neither
/// present in `records` nor equal to `root_key`. Must run on acyclic input.
fn detached_records(
    records: &[CategoryRecord],
    positions: &HashMap<&str, usize>,
    root_key: Option<&str>,
) -> Vec<bool> {
    let mut verdicts: Vec<Option<bool>> = vec![None; records.len()];
    let mut path: Vec<usize> = Vec::new();

    for start in 0..records.len() {
        path.clear();
        let mut current = start;

        let detached = loop {
            if let Some(known) = verdicts[current] {
                break known;
            }
            path.push(current);

            let parent = records[current].parent_id.as_ref().map(CategoryId::as_str);
            match parent {
                None => break false,
                Some(_) if parent == root_key => break false,
                Some(key) => match positions.get(key) {
                    Some(&next) => current = next,
                    None => break true,
                },
            }
        };

        for &idx in &path {
            verdicts[idx] = Some(detached);
        }
    }

    verdicts.into_iter().map(|v| v.unwrap_or(false)).collect()
}

fn assemble<'a>(
    parent: Option<&'a str>,
    records: &'a [CategoryRecord],
    children: &HashMap<Option<&'a str>, Vec<usize>>,
) -> Vec<CategoryNode> {
    let Some(indices) = children.get(&parent) else {
        return Vec::new();
    };

    indices
        .iter()
        .map(|&idx| {
            let record = &records[idx];
            let mut node = CategoryNode::from(record);
            node.children = assemble(Some(record.id.as_str()), records, children);
            node
        })
        .collect()
}

/// Builds the forest hanging under `root_parent_id` (`None` for top level).
///
/// Siblings keep their relative input order. A record whose parent chain ends
/// at an id that is neither present in `records` nor equal to `root_parent_id`
/// is an orphan, together with all of its descendants, and is handled
/// according to `policy`. Records attached elsewhere in the hierarchy than
/// under `root_parent_id` are left out without being reported.
pub fn build_tree(
    records: &[CategoryRecord],
    root_parent_id: Option<&CategoryId>,
    policy: OrphanPolicy,
) -> Result<CategoryForest, TreeError> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if record.name.trim().is_empty() {
            return Err(TreeError::BlankName(record.id.clone()));
        }
        if positions.insert(record.id.as_str(), idx).is_some() {
            return Err(TreeError::DuplicateId(record.id.clone()));
        }
    }

    detect_cycle(records, &positions)?;

    let root_key = root_parent_id.map(CategoryId::as_str);
    let detached = detached_records(records, &positions, root_key);

    let mut children: HashMap<Option<&str>, Vec<usize>> = HashMap::new();
    let mut orphans = Vec::new();

    for (idx, record) in records.iter().enumerate() {
        if detached[idx] {
            orphans.push(record.clone());
            continue;
        }
        let parent = record.parent_id.as_ref().map(CategoryId::as_str);
        children.entry(parent).or_default().push(idx);
    }

    let forest = CategoryForest {
        roots: assemble(root_key, records, &children),
        orphans,
    };

    if forest.has_orphans() {
        let ids: Vec<CategoryId> = forest.orphans.iter().map(|r| r.id.clone()).collect();

        match policy {
            OrphanPolicy::Reject => return Err(TreeError::Orphans(ids)),
            OrphanPolicy::Report => {
                log::warn!(
                    "{} categories detached by missing parents: {}",
                    ids.len(),
                    join_ids(&ids)
                );
            }
        }
    }

    Ok(forest)
}

/// Fetches the current category list and builds the forest under `root`.
pub async fn load_category_tree<R>(
    repo: &R,
    root: Option<&CategoryId>,
    policy: OrphanPolicy,
) -> ServiceResult<CategoryForest>
where
    R: CategoryReader + ?Sized,
{
    let records = repo.list_categories().await.map_err(|err| {
        log::error!("Failed to load categories: {err}");
        err
    })?;

    Ok(build_tree(&records, root, policy)?)
}
