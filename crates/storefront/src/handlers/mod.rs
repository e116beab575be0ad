//! HTTP handlers.
//!
//! Thin shell: each handler deserializes its parameters, calls one service
//! method, and maps the response envelope to a status code. No business
//! logic lives here.

mod products;
mod reviews;

pub use products::{
    add_product, delete_product, get_product, list_products, list_products_in_category,
};
pub use reviews::{add_review, delete_review, list_newest_reviews, list_paged_reviews};

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use storefront_core::response::ServiceResponse;

/// Envelope to HTTP: success becomes 200 OK, failure 400 Bad Request.
fn respond<T: Serialize>(response: ServiceResponse<T>) -> (StatusCode, Json<ServiceResponse<T>>) {
    let status = StatusCode::from_u16(response.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}
