use serde::{Deserialize, Serialize};

use crate::domain::types::FeatureId;

/// Feature attached to a category, with the values a product may pick from.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureRecord {
    #[serde(rename = "_id")]
    pub id: FeatureId,
    #[serde(rename = "ten")]
    pub name: String,
    #[serde(rename = "dsGiaTri", default)]
    pub values: Vec<String>,
    /// Key used by the product list filters.
    #[serde(rename = "tenTruyVan", default)]
    pub query_name: String,
}

/// Value a product currently holds for a feature.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductFeatureValue {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "dacTrungId")]
    pub feature_id: FeatureId,
    #[serde(rename = "ten")]
    pub name: String,
    #[serde(rename = "giaTri")]
    pub value: String,
}

/// A category feature paired with the value selected for one product.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FeatureSelection {
    pub feature_id: FeatureId,
    pub name: String,
    pub value: Option<String>,
    /// `false` when the stored value is not among the feature's allowed values.
    pub allowed: bool,
}
