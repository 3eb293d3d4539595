use actix_web::{HttpResponse, Responder, get, post, web};

use crate::domain::types::{CategoryId, ProductId};
use crate::dto::api::{
    CategoryOption, CategoryTreeParams, GrnDraftRequest, ProductsParams, TotalsRequest,
    TotalsResponse,
};
use crate::repository::BackOfficeRepository;
use crate::routes::respond;
use crate::services::category_tree::{OrphanPolicy, load_category_tree};
use crate::services::features::load_category_features;
use crate::services::grn::price_grn_draft;
use crate::services::price_resolver::PriceNameCache;
use crate::services::products::{ProductsQuery, list_products};
use crate::services::totals::recompute_total;
use crate::services::{ServiceError, ServiceResult};

fn optional_category_id(raw: Option<String>) -> ServiceResult<Option<CategoryId>> {
    raw.filter(|value| !value.trim().is_empty())
        .map(CategoryId::new)
        .transpose()
        .map_err(ServiceError::from)
}

#[get("/v1/categories/tree")]
pub async fn api_v1_category_tree(
    params: web::Query<CategoryTreeParams>,
    repo: web::Data<dyn BackOfficeRepository>,
) -> impl Responder {
    let params = params.into_inner();

    let root = match optional_category_id(params.root) {
        Ok(root) => root,
        Err(err) => return respond::<()>(Err(err)),
    };

    respond(load_category_tree(repo.get_ref(), root.as_ref(), params.orphans).await)
}

#[get("/v1/categories/options")]
pub async fn api_v1_category_options(
    repo: web::Data<dyn BackOfficeRepository>,
) -> impl Responder {
    let result = load_category_tree(repo.get_ref(), None, OrphanPolicy::Report)
        .await
        .map(|forest| CategoryOption::from_forest(&forest));

    respond(result)
}

#[get("/v1/categories/{category_id}/features")]
pub async fn api_v1_category_features(
    category_id: web::Path<String>,
    repo: web::Data<dyn BackOfficeRepository>,
) -> impl Responder {
    let category_id = match CategoryId::new(category_id.into_inner()) {
        Ok(id) => id,
        Err(err) => return respond::<()>(Err(err.into())),
    };

    respond(load_category_features(repo.get_ref(), &category_id).await)
}

#[get("/v1/products")]
pub async fn api_v1_products(
    params: web::Query<ProductsParams>,
    repo: web::Data<dyn BackOfficeRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = ProductsQuery {
        search: params.search,
        category: params.category,
        page: params.page,
    };

    respond(list_products(repo.get_ref(), query).await)
}

#[get("/v1/products/{product_id}/price")]
pub async fn api_v1_product_price(
    product_id: web::Path<String>,
    repo: web::Data<dyn BackOfficeRepository>,
    cache: web::Data<PriceNameCache>,
) -> impl Responder {
    let product_id = match product_id.into_inner().parse::<ProductId>() {
        Ok(id) => id,
        Err(err) => return respond::<()>(Err(ServiceError::from(err))),
    };

    let resolution = cache.resolve(repo.get_ref(), &product_id).await;
    respond(Ok(resolution))
}

#[post("/v1/grn/draft")]
pub async fn api_v1_grn_draft(
    request: web::Json<GrnDraftRequest>,
    repo: web::Data<dyn BackOfficeRepository>,
    cache: web::Data<PriceNameCache>,
) -> impl Responder {
    let request = request.into_inner();

    respond(price_grn_draft(cache.get_ref(), repo.get_ref(), request.lines).await)
}

#[post("/v1/totals")]
pub async fn api_v1_totals(request: web::Json<TotalsRequest>) -> HttpResponse {
    let result = recompute_total(&request.items)
        .map(|total| TotalsResponse { total })
        .map_err(ServiceError::from);

    respond(result)
}
