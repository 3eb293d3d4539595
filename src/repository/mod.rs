//! Collaborator contracts for the remote back-office REST API.
//!
//! Services depend on these traits only; [`HttpRepository`] is the production
//! implementation and [`mock::MockRepository`] the test double.

use async_trait::async_trait;

use crate::domain::category::CategoryRecord;
use crate::domain::feature::FeatureRecord;
use crate::domain::product::{PriceName, ProductListQuery, ProductSummary};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::errors::RepositoryResult;

pub mod errors;
#[cfg(feature = "server")]
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

#[cfg(feature = "server")]
pub use http::HttpRepository;

#[async_trait]
pub trait CategoryReader {
    /// Fetches the full flat category list.
    async fn list_categories(&self) -> RepositoryResult<Vec<CategoryRecord>>;
    async fn list_category_features(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Vec<FeatureRecord>>;
}

#[async_trait]
pub trait ProductReader {
    /// Looks up the display name and purchase cost of a product.
    async fn get_product_price_name(&self, product_id: &ProductId) -> RepositoryResult<PriceName>;
    /// Returns `(total_pages, page_of_products)`.
    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
}

/// Everything the HTTP layer needs from the catalog API, as one object-safe trait.
pub trait BackOfficeRepository: CategoryReader + ProductReader + Send + Sync {}

impl<T> BackOfficeRepository for T where T: CategoryReader + ProductReader + Send + Sync {}

