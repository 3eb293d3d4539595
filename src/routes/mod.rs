//! HTTP handlers of the catalog JSON API.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

use crate::dto::api::ApiResponse;
use crate::services::{ServiceError, ServiceResult};

pub mod api;

/// HTTP status reported for a failed service call.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound => StatusCode::NOT_FOUND,
        ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
        ServiceError::Tree(_) | ServiceError::Totals(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Wraps a service result into the `{ success, data?, error? }` envelope.
pub fn respond<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::Ok().json(ApiResponse::ok(data)),
        Err(err) => {
            let status = status_for(&err);
            if status.is_server_error() {
                log::error!("Request failed: {err}");
            }
            HttpResponse::build(status)
                .json(ApiResponse::<T>::error(err.to_string(), Some(status.as_u16())))
        }
    }
}
