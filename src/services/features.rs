//! Category feature lookups used when authoring or editing products.

use std::collections::HashMap;

use crate::domain::feature::{FeatureRecord, FeatureSelection, ProductFeatureValue};
use crate::domain::types::{CategoryId, FeatureId};
use crate::repository::CategoryReader;
use crate::services::ServiceResult;

/// Loads the features a product in `category_id` must fill in.
pub async fn load_category_features<R>(
    repo: &R,
    category_id: &CategoryId,
) -> ServiceResult<Vec<FeatureRecord>>
where
    R: CategoryReader + ?Sized,
{
    let features = repo
        .list_category_features(category_id)
        .await
        .map_err(|err| {
            log::error!("Failed to load features for category {category_id}: {err}");
            err
        })?;

    Ok(features)
}

/// Associative view over a category's features.
#[derive(Debug)]
pub struct FeatureIndex<'a> {
    by_id: HashMap<&'a FeatureId, &'a FeatureRecord>,
    by_query_name: HashMap<&'a str, &'a FeatureRecord>,
}

impl<'a> FeatureIndex<'a> {
    pub fn new(features: &'a [FeatureRecord]) -> Self {
        let mut by_id = HashMap::with_capacity(features.len());
        let mut by_query_name = HashMap::with_capacity(features.len());

        for feature in features {
            by_id.entry(&feature.id).or_insert(feature);
            if !feature.query_name.is_empty() {
                by_query_name
                    .entry(feature.query_name.as_str())
                    .or_insert(feature);
            }
        }

        Self {
            by_id,
            by_query_name,
        }
    }

    pub fn get(&self, id: &FeatureId) -> Option<&'a FeatureRecord> {
        self.by_id.get(id).copied()
    }

    pub fn by_query_name(&self, query_name: &str) -> Option<&'a FeatureRecord> {
        self.by_query_name.get(query_name).copied()
    }

    /// Whether `value` is one of the values allowed for feature `id`.
    pub fn allows(&self, id: &FeatureId, value: &str) -> bool {
        self.get(id)
            .is_some_and(|feature| feature.values.iter().any(|allowed| allowed == value))
    }
}

/// Pairs each category feature with the value stored on the product, in
/// feature order. Values outside the allowed list are kept and flagged.
pub fn select_feature_values(
    features: &[FeatureRecord],
    product_values: &[ProductFeatureValue],
) -> Vec<FeatureSelection> {
    let index = FeatureIndex::new(features);
    let mut stored: HashMap<&FeatureId, &str> = HashMap::with_capacity(product_values.len());
    for value in product_values {
        stored
            .entry(&value.feature_id)
            .or_insert(value.value.as_str());
    }

    features
        .iter()
        .map(|feature| {
            let value = stored.get(&feature.id).map(|v| v.to_string());
            let allowed = value
                .as_deref()
                .is_none_or(|v| index.allows(&feature.id, v));
            if !allowed {
                log::warn!(
                    "Feature {} holds value outside its allowed list",
                    feature.id
                );
            }
            FeatureSelection {
                feature_id: feature.id.clone(),
                name: feature.name.clone(),
                value,
                allowed,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn feature(id: &str, name: &str, query_name: &str, values: &[&str]) -> FeatureRecord {
        FeatureRecord {
            id: FeatureId::new(id).unwrap(),
            name: name.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
            query_name: query_name.to_string(),
        }
    }

    fn stored(feature_id: &str, value: &str) -> ProductFeatureValue {
        ProductFeatureValue {
            id: format!("v-{feature_id}"),
            feature_id: FeatureId::new(feature_id).unwrap(),
            name: String::new(),
            value: value.to_string(),
        }
    }

    fn phone_features() -> Vec<FeatureRecord> {
        vec![
            feature("f1", "Color", "color", &["Black", "White"]),
            feature("f2", "Memory", "memory", &["64GB", "128GB"]),
            feature("f3", "Warranty", "", &[]),
        ]
    }

    #[test]
    fn index_looks_up_by_id_and_query_name() {
        let features = phone_features();
        let index = FeatureIndex::new(&features);

        assert_eq!(
            index.by_query_name("memory").map(|f| f.name.as_str()),
            Some("Memory")
        );
        assert!(index.by_query_name("").is_none());
        assert!(index.allows(&FeatureId::new("f1").unwrap(), "White"));
        assert!(!index.allows(&FeatureId::new("f1").unwrap(), "Red"));
        assert!(index.get(&FeatureId::new("zzz").unwrap()).is_none());
    }

    #[test]
    fn selections_follow_feature_order() {
        let features = phone_features();
        let values = vec![stored("f2", "128GB"), stored("f1", "Red")];

        let selections = select_feature_values(&features, &values);

        assert_eq!(selections.len(), 3);
        assert_eq!(selections[0].value.as_deref(), Some("Red"));
        assert!(!selections[0].allowed);
        assert_eq!(selections[1].value.as_deref(), Some("128GB"));
        assert!(selections[1].allowed);
        assert!(selections[2].value.is_none());
        assert!(selections[2].allowed);
    }

    #[tokio::test]
    async fn loads_features_for_category() {
        let mut repo = MockRepository::new();
        repo.expect_list_category_features()
            .withf(|id| id.as_str() == "phones")
            .times(1)
            .returning(|_| Ok(phone_features()));

        let features = load_category_features(&repo, &CategoryId::new("phones").unwrap())
            .await
            .unwrap();

        assert_eq!(features.len(), 3);
    }
}
