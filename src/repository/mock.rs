//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::category::CategoryRecord;
use crate::domain::feature::FeatureRecord;
use crate::domain::product::{PriceName, ProductListQuery, ProductSummary};
use crate::domain::types::{CategoryId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{CategoryReader, ProductReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl CategoryReader for Repository {
        async fn list_categories(&self) -> RepositoryResult<Vec<CategoryRecord>>;
        async fn list_category_features(
            &self,
            category_id: &CategoryId,
        ) -> RepositoryResult<Vec<FeatureRecord>>;
    }

    #[async_trait]
    impl ProductReader for Repository {
        async fn get_product_price_name(&self, product_id: &ProductId) -> RepositoryResult<PriceName>;
        async fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<ProductSummary>)>;
    }
}
