use async_trait::async_trait;

use super::error::{Result, TableError};
use super::types::{Page, RowFilter, TableCursor};

/// An entity addressable by a (partition key, row key) pair.
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Logical table this entity is stored in.
    const TABLE: &'static str;
    /// Entity name used in error reporting.
    const ENTITY: &'static str;

    fn partition_key(&self) -> &str;
    fn row_key(&self) -> &str;
}

/// Storage boundary for one entity type.
///
/// Backends implement the four primitive operations; `scan_all` is provided
/// here so the continuation-cursor loop lives in exactly one place. Callers
/// that want partial pages (category listings, client-driven review paging)
/// call `query` directly instead.
#[async_trait]
pub trait TableStore<T: TableRow>: Send + Sync {
    /// Insert-only write. A row under the same key must be rejected by the
    /// backend, not overwritten.
    async fn insert(&self, row: &T) -> Result<()>;

    /// Point lookup. Absence is not an error.
    async fn get(&self, partition_key: &str, row_key: &str) -> Result<Option<T>>;

    /// Point lookup followed by delete; a no-op when the row does not exist.
    async fn delete(&self, partition_key: &str, row_key: &str) -> Result<()>;

    /// Read one segment of matching rows, at most `limit` of them, starting
    /// after `start`. Returns the segment plus a continuation cursor when
    /// more rows remain.
    async fn query(
        &self,
        filter: &RowFilter,
        limit: Option<usize>,
        start: Option<&TableCursor>,
    ) -> Result<Page<T>>;

    /// Full traversal: loops `query` until the store reports no further
    /// continuation, accumulating rows in arrival order.
    async fn scan_all(&self, filter: &RowFilter) -> Result<Vec<T>> {
        let mut rows = Vec::new();
        let mut cursor: Option<TableCursor> = None;

        loop {
            let page = self.query(filter, None, cursor.as_ref()).await?;
            rows.extend(page.rows);

            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(rows)
    }
}

/// Reject rows that arrive without both keys populated.
pub fn ensure_keys<T: TableRow>(row: &T) -> Result<()> {
    if row.partition_key().is_empty() || row.row_key().is_empty() {
        return Err(TableError::MissingKey);
    }
    Ok(())
}
