//! Application state.
//!
//! Holds the two domain services behind `Arc`s; cloned into every request
//! handler. The storage backend behind the services is chosen at compile
//! time via feature flags.

use std::sync::Arc;

use storefront_core::catalog::Product;
use storefront_core::review::Review;
use storefront_core::table::TableStore;

use crate::services::{ProductCatalog, ReviewLedger};

// ============================================================================
// Compile-time feature validation
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<ProductCatalog>,
    pub reviews: Arc<ReviewLedger>,
}

impl AppState {
    fn build(
        product_store: Arc<dyn TableStore<Product>>,
        review_store: Arc<dyn TableStore<Review>>,
    ) -> Self {
        Self {
            catalog: Arc::new(ProductCatalog::new(product_store)),
            reviews: Arc::new(ReviewLedger::new(review_store)),
        }
    }
}

// ============================================================================
// Factory functions per storage backend
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::config::Config;
    use crate::storage::InMemoryTableStore;

    impl AppState {
        /// Creates AppState backed by in-memory tables.
        /// Useful for tests and local runs without external dependencies.
        pub async fn new(_config: &Config) -> Result<Self, anyhow::Error> {
            let product_store = Arc::new(InMemoryTableStore::<Product>::new());
            let review_store = Arc::new(InMemoryTableStore::<Review>::new());

            Ok(Self::build(product_store, review_store))
        }
    }
}

#[cfg(feature = "dynamodb")]
mod dynamodb_backend {
    use super::*;
    use crate::config::Config;
    use crate::storage::{ensure_table, DynamoTableStore};

    impl AppState {
        /// Creates AppState backed by DynamoDB, provisioning both tables
        /// idempotently before first use.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
            if let Some(endpoint) = &config.aws_endpoint_url {
                loader = loader.endpoint_url(endpoint.clone());
            }
            let aws_config = loader.load().await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);

            ensure_table(&client, &config.products_table).await?;
            ensure_table(&client, &config.reviews_table).await?;

            let product_store = Arc::new(DynamoTableStore::new(
                client.clone(),
                config.products_table.clone(),
            ));
            let review_store = Arc::new(DynamoTableStore::new(
                client,
                config.reviews_table.clone(),
            ));

            Ok(Self::build(product_store, review_store))
        }
    }
}
