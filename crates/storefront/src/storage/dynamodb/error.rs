//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `TableError` from `storefront_core::table`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;

use storefront_core::table::TableError;

/// Map a GetItem SDK error to TableError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> TableError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            TableError::QueryFailed("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            TableError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            TableError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            TableError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => TableError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to TableError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    entity_type: &'static str,
    key: impl Into<String>,
) -> TableError {
    let key_str = key.into();
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => TableError::AlreadyExists {
            entity_type,
            key: key_str,
        },
        PutItemError::ResourceNotFoundException(_) => {
            TableError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            TableError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            TableError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            TableError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            TableError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            TableError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => TableError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to TableError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> TableError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => {
            TableError::QueryFailed("Table not found".to_string())
        }
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            TableError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            TableError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            TableError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            TableError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => TableError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to TableError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> TableError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            TableError::QueryFailed("Table not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            TableError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            TableError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            TableError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => TableError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to TableError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> TableError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => {
            TableError::QueryFailed("Table not found".to_string())
        }
        ScanError::ProvisionedThroughputExceededException(_) => {
            TableError::QueryFailed("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            TableError::QueryFailed("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            TableError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => TableError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a generic connection/config error to TableError.
pub fn map_connection_error(err: impl std::fmt::Display) -> TableError {
    TableError::ConnectionFailed(err.to_string())
}
