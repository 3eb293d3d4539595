use crate::domain::product::{ProductListQuery, ProductSummary};
use crate::pagination::Paginated;
use crate::repository::ProductReader;
use crate::services::ServiceResult;

/// Query parameters accepted by the product list page.
#[derive(Debug, Default)]
pub struct ProductsQuery {
    /// Optional free-form search string applied to product names.
    pub search: Option<String>,
    pub category: Option<String>,
    /// Optional page number, starting at 1.
    pub page: Option<usize>,
}

/// Returns one page of products, searching by name when a term is given.
pub async fn list_products<R>(
    repo: &R,
    params: ProductsQuery,
) -> ServiceResult<Paginated<ProductSummary>>
where
    R: ProductReader + ?Sized,
{
    let page = params.page.filter(|p| *p > 0).unwrap_or(1);
    let mut query = ProductListQuery::new(page);

    let search = params
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(term) = search {
        query = query.search(term);
    }

    if let Some(category) = params.category.filter(|c| !c.trim().is_empty()) {
        query = query.category(category.trim());
    }

    let (total_pages, products) = repo.list_products(query).await.map_err(|err| {
        log::error!("Failed to list products: {err}");
        err
    })?;

    Ok(Paginated::new(products, page, total_pages))
}
