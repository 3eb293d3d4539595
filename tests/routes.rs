#![cfg(feature = "server")]

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use backoffice_catalog::configure_api;
use backoffice_catalog::repository::BackOfficeRepository;
use backoffice_catalog::services::price_resolver::PriceNameCache;
use serde_json::{Value, json};

mod common;

use common::FakeCatalog;

macro_rules! init_app {
    ($catalog:expr) => {{
        let repo: Arc<dyn BackOfficeRepository> = $catalog;
        test::init_service(
            App::new()
                .configure(configure_api)
                .app_data(web::Data::from(repo))
                .app_data(web::Data::new(PriceNameCache::new())),
        )
        .await
    }};
}

#[actix_web::test]
async fn category_tree_reports_orphans() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/tree")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));

    let roots = body["data"]["roots"].as_array().unwrap();
    let root_ids: Vec<_> = roots.iter().map(|r| r["_id"].as_str().unwrap()).collect();
    assert_eq!(root_ids, vec!["electronics", "kitchen"]);
    assert_eq!(roots[0]["children"][0]["_id"], json!("phones"));
    assert_eq!(roots[0]["children"][0]["children"][0]["_id"], json!("cases"));

    let orphan_ids: Vec<_> = body["data"]["orphans"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["_id"].as_str().unwrap())
        .collect();
    assert_eq!(orphan_ids, vec!["lost", "stray"]);
}

#[actix_web::test]
async fn category_tree_can_reject_orphans() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/tree?orphans=reject")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["status"], json!(422));
}

#[actix_web::test]
async fn category_subtree_by_root() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/tree?root=electronics")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let roots = body["data"]["roots"].as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["_id"], json!("phones"));
}

#[actix_web::test]
async fn category_options_are_indented() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/options")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let options: Vec<(String, u64)> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| {
            (
                o["id"].as_str().unwrap().to_string(),
                o["depth"].as_u64().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        options,
        vec![
            ("electronics".to_string(), 0),
            ("phones".to_string(), 1),
            ("cases".to_string(), 2),
            ("kitchen".to_string(), 0),
        ]
    );
}

#[actix_web::test]
async fn category_features_for_unknown_category_is_not_found() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/phones/features")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["tenTruyVan"], json!("color"));

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/unknown/features")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn product_price_is_memoized() {
    let catalog = Arc::new(FakeCatalog::sample());
    let app = init_app!(catalog.clone());

    let req = test::TestRequest::get()
        .uri("/api/v1/products/kettle/price")
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/products/kettle/price")
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(catalog.price_calls(), 1);
    assert_eq!(first["data"]["source"], json!("fetched"));
    assert_eq!(second["data"]["source"], json!("cached"));
    assert_eq!(second["data"]["value"], json!({"price": 12.0, "name": "Kettle"}));
}

#[actix_web::test]
async fn unknown_product_price_is_a_flagged_placeholder() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/products/ghost/price")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["source"], json!("not_found"));
    assert_eq!(body["data"]["value"], json!({"price": 0.0, "name": ""}));
}

#[actix_web::test]
async fn products_are_paginated() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::get()
        .uri("/api/v1/products?search=kett")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["page"], json!(1));
    assert_eq!(body["data"]["pages"], json!([1]));
    assert_eq!(body["data"]["items"][0]["tenSP"], json!("Kettle"));
}

#[actix_web::test]
async fn totals_sum_posted_lines() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::post()
        .uri("/api/v1/totals")
        .set_json(json!({
            "items": [
                {"productId": "a", "quantity": 1, "unitPrice": 10.0, "lineTotal": 10.0},
                {"productId": "b", "quantity": 5, "unitPrice": 5.0, "lineTotal": 25.0},
                {"productId": "c", "quantity": 0, "unitPrice": 3.0, "lineTotal": 0.0}
            ]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["total"], json!(35.0));
}

#[actix_web::test]
async fn totals_reject_negative_amounts() {
    let app = init_app!(Arc::new(FakeCatalog::sample()));

    let req = test::TestRequest::post()
        .uri("/api/v1/totals")
        .set_json(json!({
            "items": [{"productId": "a", "quantity": 1, "unitPrice": -2.0}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn grn_draft_is_priced_through_the_cache() {
    let catalog = Arc::new(FakeCatalog::sample());
    let app = init_app!(catalog.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/grn/draft")
        .set_json(json!({
            "lines": [
                {"productId": "kettle", "quantity": 2},
                {"productId": "mug", "soLuong": 4},
                {"productId": "kettle", "quantity": 1},
                {"productId": "ghost", "quantity": 9}
            ]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(catalog.price_calls(), 3);
    assert_eq!(body["data"]["total"], json!(46.0));
    assert_eq!(body["data"]["lines"][1]["lineTotal"], json!(10.0));
    assert_eq!(body["data"]["lines"][1]["name"], json!("Mug"));
    assert_eq!(body["data"]["unresolved"], json!(["ghost"]));
}
