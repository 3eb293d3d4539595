use serde::{Deserialize, Serialize};

use crate::domain::types::{Money, ProductId};

/// Display name and unit cost resolved for a product.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceName {
    pub price: Money,
    pub name: String,
}

impl PriceName {
    #[must_use]
    pub fn new(price: Money, name: impl Into<String>) -> Self {
        Self {
            price,
            name: name.into(),
        }
    }

    /// Zero-valued stand-in returned when a lookup yields nothing usable.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::default()
    }
}

/// Row of the product list returned by the catalog API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    #[serde(rename = "_id")]
    pub id: ProductId,
    #[serde(rename = "tenSP")]
    pub name: String,
    /// Selling price.
    #[serde(rename = "giaBan", default)]
    pub price: Money,
    /// Purchase cost.
    #[serde(rename = "giaNhap", default)]
    pub cost: Money,
    #[serde(rename = "soLuong", alias = "SoLuong", default)]
    pub stock: u32,
}

/// Filters accepted by the product list endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: usize,
}

impl ProductListQuery {
    pub fn new(page: usize) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
