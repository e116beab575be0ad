use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use storefront_core::review::NewReview;

use super::respond;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NewestReviewsQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewPageQuery {
    pub count: Option<usize>,
    pub next_partition_key: Option<String>,
    pub next_row_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddReviewRequest {
    pub expected_last_row_key: Option<String>,
    #[serde(flatten)]
    pub review: NewReview,
}

/// Newest reviews of a product (GET /api/reviews/{product_name}?count=5).
pub async fn list_newest_reviews(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
    Query(params): Query<NewestReviewsQuery>,
) -> impl IntoResponse {
    respond(state.reviews.list_newest(&product_name, params.count).await)
}

/// One client-driven page of reviews (GET /api/reviews/{product_name}/page).
pub async fn list_paged_reviews(
    State(state): State<AppState>,
    Path(product_name): Path<String>,
    Query(params): Query<ReviewPageQuery>,
) -> impl IntoResponse {
    respond(
        state
            .reviews
            .list_paged(
                &product_name,
                params.count.unwrap_or(5),
                params.next_partition_key,
                params.next_row_key,
            )
            .await,
    )
}

/// Append a review (POST /api/reviews).
pub async fn add_review(
    State(state): State<AppState>,
    Json(payload): Json<AddReviewRequest>,
) -> impl IntoResponse {
    tracing::info!(product_name = %payload.review.product_name, "Adding review");
    respond(
        state
            .reviews
            .add(payload.expected_last_row_key, payload.review)
            .await,
    )
}

/// Delete a review (DELETE /api/reviews/{product_name}/{row_key}).
pub async fn delete_review(
    State(state): State<AppState>,
    Path((product_name, row_key)): Path<(String, String)>,
) -> impl IntoResponse {
    tracing::info!(%product_name, "Deleting review");
    respond(state.reviews.delete(&product_name, &row_key).await)
}
