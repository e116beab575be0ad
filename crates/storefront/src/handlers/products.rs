use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use storefront_core::catalog::NewProduct;

use super::respond;
use crate::state::AppState;

/// List every product (GET /api/products).
pub async fn list_products(State(state): State<AppState>) -> impl IntoResponse {
    respond(state.catalog.list_all().await)
}

/// List the products of one category (GET /api/products/{category}).
pub async fn list_products_in_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    respond(state.catalog.list_by_category(&category).await)
}

/// Point lookup (GET /api/products/{category}/{name}).
pub async fn get_product(
    State(state): State<AppState>,
    Path((category, name)): Path<(String, String)>,
) -> impl IntoResponse {
    respond(state.catalog.get(&category, &name).await)
}

/// Add a product (POST /api/products).
pub async fn add_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> impl IntoResponse {
    tracing::info!(category = %payload.category, name = %payload.name, "Adding product");
    respond(state.catalog.add(payload).await)
}

/// Delete a product (DELETE /api/products/{category}/{name}).
pub async fn delete_product(
    State(state): State<AppState>,
    Path((category, name)): Path<(String, String)>,
) -> impl IntoResponse {
    tracing::info!(%category, %name, "Deleting product");
    respond(state.catalog.delete(&category, &name).await)
}
