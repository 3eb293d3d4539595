use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use backoffice_catalog::domain::category::CategoryRecord;
use backoffice_catalog::domain::feature::FeatureRecord;
use backoffice_catalog::domain::product::{PriceName, ProductListQuery, ProductSummary};
use backoffice_catalog::domain::types::{CategoryId, FeatureId, Money, ProductId};
use backoffice_catalog::repository::errors::{RepositoryError, RepositoryResult};
use backoffice_catalog::repository::{CategoryReader, ProductReader};

pub fn category(id: &str, name: &str, parent: Option<&str>) -> CategoryRecord {
    CategoryRecord::new(
        CategoryId::new(id).unwrap(),
        name,
        parent.map(|p| CategoryId::new(p).unwrap()),
    )
}

/// In-memory stand-in for the catalog REST API.
#[derive(Default)]
pub struct FakeCatalog {
    pub categories: Vec<CategoryRecord>,
    pub features: HashMap<String, Vec<FeatureRecord>>,
    pub prices: HashMap<String, PriceName>,
    pub products: Vec<ProductSummary>,
    pub price_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn sample() -> Self {
        let mut features = HashMap::new();
        features.insert(
            "phones".to_string(),
            vec![FeatureRecord {
                id: FeatureId::new("f-color").unwrap(),
                name: "Color".to_string(),
                values: vec!["Black".to_string(), "White".to_string()],
                query_name: "color".to_string(),
            }],
        );

        let mut prices = HashMap::new();
        prices.insert(
            "kettle".to_string(),
            PriceName::new(Money::new(12.0).unwrap(), "Kettle"),
        );
        prices.insert(
            "mug".to_string(),
            PriceName::new(Money::new(2.5).unwrap(), "Mug"),
        );

        let products = vec![ProductSummary {
            id: ProductId::new("kettle").unwrap(),
            name: "Kettle".to_string(),
            price: Money::new(20.0).unwrap(),
            cost: Money::new(12.0).unwrap(),
            stock: 7,
        }];

        Self {
            categories: vec![
                category("electronics", "Electronics", None),
                category("phones", "Phones", Some("electronics")),
                category("kitchen", "Kitchen", None),
                category("cases", "Cases", Some("phones")),
                category("lost", "Lost", Some("deleted")),
                category("stray", "Stray", Some("lost")),
            ],
            features,
            prices,
            products,
            price_calls: AtomicUsize::new(0),
        }
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CategoryReader for FakeCatalog {
    async fn list_categories(&self) -> RepositoryResult<Vec<CategoryRecord>> {
        Ok(self.categories.clone())
    }

    async fn list_category_features(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Vec<FeatureRecord>> {
        self.features
            .get(category_id.as_str())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl ProductReader for FakeCatalog {
    async fn get_product_price_name(&self, product_id: &ProductId) -> RepositoryResult<PriceName> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.prices
            .get(product_id.as_str())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)> {
        let items = self
            .products
            .iter()
            .filter(|p| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|term| p.name.to_lowercase().contains(&term.to_lowercase()))
            })
            .cloned()
            .collect();
        Ok((1, items))
    }
}
