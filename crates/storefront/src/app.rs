use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{
        add_product, add_review, delete_product, delete_review, get_product,
        list_newest_reviews, list_paged_reviews, list_products, list_products_in_category,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        // Product routes
        .route("/products", get(list_products).post(add_product))
        .route("/products/{category}", get(list_products_in_category))
        .route(
            "/products/{category}/{name}",
            get(get_product).delete(delete_product),
        )
        // Review routes
        .route("/reviews", post(add_review))
        .route("/reviews/{product_name}", get(list_newest_reviews))
        .route("/reviews/{product_name}/page", get(list_paged_reviews))
        .route("/reviews/{product_name}/{row_key}", delete(delete_review))
        .layer(cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
