//! In-memory table store.
//!
//! Rows live in a `BTreeMap` keyed by (partition key, row key), so iteration
//! order matches the ascending key order the real table store serves. Pages
//! are bounded by a configurable size so continuation-cursor loops get
//! exercised for real in tests.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_core::table::{
    ensure_keys, Page, Result, RowFilter, TableCursor, TableError, TableRow, TableStore,
};

const DEFAULT_PAGE_SIZE: usize = 1000;

/// BTreeMap-backed store for testing and local runs.
///
/// Data is not persisted and is lost when the store is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryTableStore<T> {
    rows: Arc<RwLock<BTreeMap<(String, String), T>>>,
    page_size: usize,
}

impl<T> Default for InMemoryTableStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> InMemoryTableStore<T> {
    /// Creates an empty store with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates an empty store serving at most `page_size` rows per segment.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl<T: TableRow> TableStore<T> for InMemoryTableStore<T> {
    async fn insert(&self, row: &T) -> Result<()> {
        ensure_keys(row)?;

        let key = (row.partition_key().to_string(), row.row_key().to_string());
        let mut rows = self.rows.write().await;
        if rows.contains_key(&key) {
            return Err(TableError::AlreadyExists {
                entity_type: T::ENTITY,
                key: format!("{}/{}", key.0, key.1),
            });
        }
        rows.insert(key, row.clone());
        Ok(())
    }

    async fn get(&self, partition_key: &str, row_key: &str) -> Result<Option<T>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&(partition_key.to_string(), row_key.to_string()))
            .cloned())
    }

    async fn delete(&self, partition_key: &str, row_key: &str) -> Result<()> {
        let mut rows = self.rows.write().await;
        // Absent rows are a no-op, not an error.
        rows.remove(&(partition_key.to_string(), row_key.to_string()));
        Ok(())
    }

    async fn query(
        &self,
        filter: &RowFilter,
        limit: Option<usize>,
        start: Option<&TableCursor>,
    ) -> Result<Page<T>> {
        let rows = self.rows.read().await;

        let lower = match start {
            Some(cursor) => Bound::Excluded((
                cursor.next_partition_key.clone(),
                cursor.next_row_key.clone(),
            )),
            None => match filter {
                // A partition query can start at the partition directly.
                RowFilter::Partition(pk) => Bound::Included((pk.clone(), String::new())),
                _ => Bound::Unbounded,
            },
        };

        let wanted = limit.unwrap_or(usize::MAX);
        let mut scanned = 0usize;
        let mut page_rows = Vec::new();
        let mut scanned_key: Option<(String, String)> = None;
        let mut exhausted = true;

        for ((pk, rk), row) in rows.range((lower, Bound::Unbounded)) {
            // Past the partition: nothing further can match.
            if let RowFilter::Partition(want) = filter {
                if pk > want {
                    break;
                }
            }

            if page_rows.len() >= wanted || scanned >= self.page_size {
                exhausted = false;
                break;
            }

            scanned += 1;
            if filter.matches(pk, rk) {
                page_rows.push(row.clone());
            }
            scanned_key = Some((pk.clone(), rk.clone()));
        }

        let next = if exhausted {
            None
        } else {
            scanned_key.map(|(pk, rk)| TableCursor::new(T::TABLE, pk, rk))
        };

        Ok(Page {
            rows: page_rows,
            next,
        })
    }
}
