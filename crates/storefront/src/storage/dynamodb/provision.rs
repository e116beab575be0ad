//! Idempotent table provisioning.
//!
//! Each logical table is created at startup if absent: PK (HASH) + SK
//! (RANGE), both strings, pay-per-request billing. An already-existing table
//! is success, so every process can run this unconditionally before first
//! use.

use std::time::Duration;

use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;

use storefront_core::table::{Result, TableError};

use super::error::map_connection_error;

const ACTIVE_POLL_ATTEMPTS: u32 = 30;
const ACTIVE_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Create the table if it does not exist and wait until it is usable.
pub async fn ensure_table(client: &Client, table_name: &str) -> Result<()> {
    let key_schema = vec![
        KeySchemaElement::builder()
            .attribute_name("PK")
            .key_type(KeyType::Hash)
            .build()
            .map_err(map_connection_error)?,
        KeySchemaElement::builder()
            .attribute_name("SK")
            .key_type(KeyType::Range)
            .build()
            .map_err(map_connection_error)?,
    ];
    let attribute_definitions = vec![
        AttributeDefinition::builder()
            .attribute_name("PK")
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(map_connection_error)?,
        AttributeDefinition::builder()
            .attribute_name("SK")
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(map_connection_error)?,
    ];

    let created = client
        .create_table()
        .table_name(table_name)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match created {
        Ok(_) => {
            tracing::info!(table = table_name, "Created table");
            wait_for_table_active(client, table_name).await
        }
        Err(err) => match err.into_service_error() {
            CreateTableError::ResourceInUseException(_) => {
                tracing::debug!(table = table_name, "Table already exists");
                Ok(())
            }
            err => Err(TableError::ConnectionFailed(format!(
                "CreateTable failed for '{table_name}': {err:?}"
            ))),
        },
    }
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    for _ in 0..ACTIVE_POLL_ATTEMPTS {
        let described = client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(map_connection_error)?;

        let status = described.table().and_then(|t| t.table_status());
        if status == Some(&TableStatus::Active) {
            return Ok(());
        }

        tokio::time::sleep(ACTIVE_POLL_INTERVAL).await;
    }

    Err(TableError::ConnectionFailed(format!(
        "table '{table_name}' did not become active"
    )))
}
