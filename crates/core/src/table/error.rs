use thiserror::Error;

/// Errors that can occur during table-store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Cannot write a row without both partition and row key")]
    MissingKey,
    #[error("{entity_type} already stored under key: {key}")]
    AlreadyExists {
        entity_type: &'static str,
        key: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for table-store operations.
pub type Result<T> = std::result::Result<T, TableError>;
