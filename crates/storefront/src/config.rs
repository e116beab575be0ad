use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Physical table for products (default: "Products").
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub products_table: String,
    /// Physical table for reviews (default: "Reviews").
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub reviews_table: String,
    /// Endpoint override for local DynamoDB (default: none, use AWS).
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PRODUCTS_TABLE` - products table name (default: "Products")
    /// - `REVIEWS_TABLE` - reviews table name (default: "Reviews")
    /// - `AWS_ENDPOINT_URL` - DynamoDB endpoint override (default: unset)
    pub fn from_env() -> Self {
        Self {
            products_table: env::var("PRODUCTS_TABLE").unwrap_or_else(|_| "Products".to_string()),
            reviews_table: env::var("REVIEWS_TABLE").unwrap_or_else(|_| "Reviews".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
