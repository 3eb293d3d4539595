//! Catalog core of the back-office dashboard: category trees built from the
//! flat API listing, memoized product price lookups, and line-item totals,
//! plus a thin JSON API exposing them to dashboard screens.

#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::{BackOfficeRepository, HttpRepository};
#[cfg(feature = "server")]
use crate::services::price_resolver::PriceNameCache;

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod pagination;
pub mod repository;
pub mod services;

#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;

/// Registers the `/api` scope with every catalog endpoint.
#[cfg(feature = "server")]
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    use crate::routes::api::{
        api_v1_category_features, api_v1_category_options, api_v1_category_tree, api_v1_grn_draft,
        api_v1_product_price, api_v1_products, api_v1_totals,
    };

    cfg.service(
        web::scope("/api")
            .service(api_v1_category_tree)
            .service(api_v1_category_options)
            .service(api_v1_category_features)
            .service(api_v1_products)
            .service(api_v1_product_price)
            .service(api_v1_grn_draft)
            .service(api_v1_totals),
    );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let repo = HttpRepository::new(&server_config.api)
        .map_err(|e| std::io::Error::other(format!("Failed to create catalog client: {e}")))?;
    let repo: Arc<dyn BackOfficeRepository> = Arc::new(repo);
    let repo = web::Data::from(repo);

    // One price cache per server process; it lives until shutdown.
    let price_cache = web::Data::new(PriceNameCache::new());

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving catalog API on {}:{} against {}",
        bind_address.0,
        bind_address.1,
        server_config.api.base_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(configure_api)
            .app_data(repo.clone())
            .app_data(price_cache.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
