//! `reqwest`-backed implementation of the repository traits.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::category::CategoryRecord;
use crate::domain::feature::FeatureRecord;
use crate::domain::product::{PriceName, ProductListQuery, ProductSummary};
use crate::domain::types::{CategoryId, Money, ProductId};
use crate::models::config::ApiConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, ProductReader};

#[derive(Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<CategoryRecord>,
}

#[derive(Deserialize)]
struct FeaturesEnvelope {
    #[serde(default)]
    features: Vec<FeatureRecord>,
}

#[derive(Deserialize)]
struct ProductDetailEnvelope {
    #[serde(rename = "productDetail")]
    product_detail: Option<ProductPriceNameWire>,
}

#[derive(Deserialize)]
struct ProductPriceNameWire {
    #[serde(rename = "tenSP", default)]
    name: String,
    #[serde(rename = "giaNhap", default)]
    cost: Money,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<ProductSummary>,
    #[serde(rename = "totalPage", default)]
    total_pages: usize,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the catalog REST API.
#[derive(Clone, Debug)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    category_path: String,
    product_path: String,
    token: Option<String>,
}

impl HttpRepository {
    pub fn new(config: &ApiConfig) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            category_path: config.category_path.clone(),
            product_path: config.product_path.clone(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    fn url(&self, resource: &str, endpoint: &str) -> String {
        format!("{}{}/{}", self.base_url, resource, endpoint)
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and decodes a successful JSON body.
    ///
    /// 404 maps to [`RepositoryError::NotFound`]; other non-success statuses
    /// carry the `message` field of the error body when the API provides one.
    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            log::error!("Catalog API request failed with status {status}: {message}");
            return Err(RepositoryError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to decode catalog API response: {e}");
            RepositoryError::from(e)
        })
    }
}

#[async_trait]
impl CategoryReader for HttpRepository {
    async fn list_categories(&self) -> RepositoryResult<Vec<CategoryRecord>> {
        let url = self.url(&self.category_path, "getCategories");
        let envelope: CategoriesEnvelope = self.send_json(self.get(&url)).await?;
        Ok(envelope.categories)
    }

    async fn list_category_features(
        &self,
        category_id: &CategoryId,
    ) -> RepositoryResult<Vec<FeatureRecord>> {
        let url = self.url(
            &self.category_path,
            &format!("getFeaturesByCategory/{category_id}"),
        );
        let envelope: FeaturesEnvelope = self.send_json(self.get(&url)).await?;
        Ok(envelope.features)
    }
}

#[async_trait]
impl ProductReader for HttpRepository {
    async fn get_product_price_name(&self, product_id: &ProductId) -> RepositoryResult<PriceName> {
        let url = self.url(&self.product_path, &format!("getProductDetail/{product_id}"));
        let envelope: ProductDetailEnvelope = self.send_json(self.get(&url)).await?;
        let detail = envelope.product_detail.ok_or(RepositoryError::NotFound)?;
        Ok(PriceName::new(detail.cost, detail.name))
    }

    async fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<ProductSummary>)> {
        let page = query.page.max(1).to_string();

        let request = match &query.search {
            Some(term) => {
                let url = self.url(&self.product_path, "searchProduct");
                self.get(&url)
                    .query(&[("searchName", term.as_str()), ("pageNum", page.as_str())])
            }
            None => {
                let url = self.url(&self.product_path, "getProducts");
                let mut params = vec![("pageNum", page.as_str())];
                if let Some(category) = &query.category {
                    params.push(("category", category.as_str()));
                }
                self.get(&url).query(&params)
            }
        };

        let envelope: ProductsEnvelope = self.send_json(request).await?;
        Ok((envelope.total_pages, envelope.products))
    }
}
