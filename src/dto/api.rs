//! DTOs exposed by the catalog JSON API.

use serde::{Deserialize, Serialize};

use crate::domain::category::CategoryForest;
use crate::domain::line_item::LineItem;
use crate::services::category_tree::OrphanPolicy;
use crate::services::grn::DraftLine;

/// Error half of the [`ApiResponse`] envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Envelope wrapping every response: `{ success, data?, error? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorBody {
                message: message.into(),
                status,
            }),
        }
    }
}

/// Query parameters accepted by `/api/v1/categories/tree`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryTreeParams {
    /// Build the subtree below this category instead of the whole forest.
    pub root: Option<String>,
    #[serde(default)]
    pub orphans: OrphanPolicy,
}

/// One entry of the indented category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: String,
    pub name: String,
    pub depth: usize,
}

impl CategoryOption {
    pub fn from_forest(forest: &CategoryForest) -> Vec<Self> {
        forest
            .flatten()
            .into_iter()
            .map(|(node, depth)| CategoryOption {
                id: node.id.to_string(),
                name: node.name.clone(),
                depth,
            })
            .collect()
    }
}

/// Query parameters accepted by `/api/v1/products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct GrnDraftRequest {
    pub lines: Vec<DraftLine>,
}

#[derive(Debug, Deserialize)]
pub struct TotalsRequest {
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsResponse {
    pub total: f64,
}
