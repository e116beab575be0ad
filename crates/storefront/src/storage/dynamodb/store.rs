//! DynamoDB table store.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use storefront_core::table::{
    ensure_keys, Page, Result, RowFilter, TableCursor, TableError, TableStore,
};

use super::conversions::DynamoRecord;
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_scan_error,
};

/// DynamoDB-backed store for one logical table.
///
/// Cheap to clone; each service holds the handle for its own table.
#[derive(Debug, Clone)]
pub struct DynamoTableStore {
    client: Client,
    table_name: String,
}

impl DynamoTableStore {
    /// Creates a store over the given client and physical table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    fn start_key(
        &self,
        start: Option<&TableCursor>,
    ) -> Option<HashMap<String, AttributeValue>> {
        start.map(|cursor| {
            HashMap::from([
                (
                    "PK".to_string(),
                    AttributeValue::S(cursor.next_partition_key.clone()),
                ),
                (
                    "SK".to_string(),
                    AttributeValue::S(cursor.next_row_key.clone()),
                ),
            ])
        })
    }

    fn continuation(
        &self,
        last_evaluated_key: Option<HashMap<String, AttributeValue>>,
    ) -> Result<Option<TableCursor>> {
        match last_evaluated_key {
            None => Ok(None),
            Some(key) => {
                let pk = key
                    .get("PK")
                    .and_then(|v| v.as_s().ok())
                    .cloned()
                    .ok_or_else(|| {
                        TableError::Serialization("continuation key missing PK".to_string())
                    })?;
                let sk = key
                    .get("SK")
                    .and_then(|v| v.as_s().ok())
                    .cloned()
                    .ok_or_else(|| {
                        TableError::Serialization("continuation key missing SK".to_string())
                    })?;
                Ok(Some(TableCursor::new(self.table_name.clone(), pk, sk)))
            }
        }
    }
}

#[async_trait]
impl<T: DynamoRecord> TableStore<T> for DynamoTableStore {
    async fn insert(&self, row: &T) -> Result<()> {
        ensure_keys(row)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(row.to_item()))
            .condition_expression("attribute_not_exists(PK) AND attribute_not_exists(SK)")
            .send()
            .await
            .map_err(|e| {
                map_put_item_error(
                    e,
                    T::ENTITY,
                    format!("{}/{}", row.partition_key(), row.row_key()),
                )
            })?;

        Ok(())
    }

    async fn get(&self, partition_key: &str, row_key: &str) -> Result<Option<T>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(partition_key.to_string()))
            .key("SK", AttributeValue::S(row_key.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(T::from_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, partition_key: &str, row_key: &str) -> Result<()> {
        // Retrieve first; deleting an absent row is a no-op.
        let existing: Option<T> = TableStore::get(self, partition_key, row_key).await?;
        if existing.is_none() {
            return Ok(());
        }

        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(partition_key.to_string()))
            .key("SK", AttributeValue::S(row_key.to_string()))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }

    async fn query(
        &self,
        filter: &RowFilter,
        limit: Option<usize>,
        start: Option<&TableCursor>,
    ) -> Result<Page<T>> {
        let limit = limit.map(|n| n.min(i32::MAX as usize) as i32);

        let (items, last_key) = match filter {
            RowFilter::Partition(pk) => {
                let result = self
                    .client
                    .query()
                    .table_name(&self.table_name)
                    .key_condition_expression("PK = :pk")
                    .expression_attribute_values(":pk", AttributeValue::S(pk.clone()))
                    .set_limit(limit)
                    .set_exclusive_start_key(self.start_key(start))
                    .send()
                    .await
                    .map_err(map_query_error)?;
                (
                    result.items.unwrap_or_default(),
                    result.last_evaluated_key,
                )
            }
            RowFilter::All => {
                let result = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .set_limit(limit)
                    .set_exclusive_start_key(self.start_key(start))
                    .send()
                    .await
                    .map_err(map_scan_error)?;
                (
                    result.items.unwrap_or_default(),
                    result.last_evaluated_key,
                )
            }
            // Row-key probes cross partitions, so they cannot use the key
            // schema; a filtered scan is the only shape the store offers
            // without a secondary index.
            RowFilter::RowKey(rk) => {
                let result = self
                    .client
                    .scan()
                    .table_name(&self.table_name)
                    .filter_expression("SK = :sk")
                    .expression_attribute_values(":sk", AttributeValue::S(rk.clone()))
                    .set_limit(limit)
                    .set_exclusive_start_key(self.start_key(start))
                    .send()
                    .await
                    .map_err(map_scan_error)?;
                (
                    result.items.unwrap_or_default(),
                    result.last_evaluated_key,
                )
            }
        };

        let rows = items
            .iter()
            .map(T::from_item)
            .collect::<Result<Vec<T>>>()?;
        let next = self.continuation(last_key)?;

        Ok(Page { rows, next })
    }
}
