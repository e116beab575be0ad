use serde::{Deserialize, Serialize};

/// Continuation cursor returned by a partial scan.
///
/// Marks the key of the last row a segment read, plus the logical table name.
/// Handing it back verbatim resumes the query strictly after that row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCursor {
    pub next_partition_key: String,
    pub next_row_key: String,
    pub table: String,
}

impl TableCursor {
    pub fn new(
        table: impl Into<String>,
        next_partition_key: impl Into<String>,
        next_row_key: impl Into<String>,
    ) -> Self {
        Self {
            next_partition_key: next_partition_key.into(),
            next_row_key: next_row_key.into(),
            table: table.into(),
        }
    }
}

/// One segment of a paginated query: the rows read plus the cursor to resume
/// from, absent when the store reports no further results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub next: Option<TableCursor>,
}

impl<T> Page<T> {
    /// A page with no rows and no continuation.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            next: None,
        }
    }
}

/// Row filter for scans and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFilter {
    /// Every row in every partition.
    All,
    /// Rows whose partition key equals the given value.
    Partition(String),
    /// Rows whose row key equals the given value, across all partitions.
    RowKey(String),
}

impl RowFilter {
    /// Whether a row with the given keys passes this filter.
    pub fn matches(&self, partition_key: &str, row_key: &str) -> bool {
        match self {
            RowFilter::All => true,
            RowFilter::Partition(pk) => partition_key == pk,
            RowFilter::RowKey(rk) => row_key == rk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_all_matches_everything() {
        assert!(RowFilter::All.matches("Fruit", "Apple"));
        assert!(RowFilter::All.matches("", ""));
    }

    #[test]
    fn test_filter_partition() {
        let filter = RowFilter::Partition("Fruit".to_string());
        assert!(filter.matches("Fruit", "Apple"));
        assert!(filter.matches("Fruit", "Banana"));
        assert!(!filter.matches("Dairy", "Apple"));
    }

    #[test]
    fn test_filter_row_key_ignores_partition() {
        let filter = RowFilter::RowKey("Apple".to_string());
        assert!(filter.matches("Fruit", "Apple"));
        assert!(filter.matches("Dairy", "Apple"));
        assert!(!filter.matches("Fruit", "Banana"));
    }

    #[test]
    fn test_empty_page_has_no_continuation() {
        let page: Page<String> = Page::empty();
        assert!(page.rows.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_cursor_round_trips_through_json() {
        let cursor = TableCursor::new("Reviews", "Apple", "0000000000000000001");
        let json = serde_json::to_string(&cursor).unwrap();
        let back: TableCursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);
    }
}
