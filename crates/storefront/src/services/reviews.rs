//! Review ledger service.
//!
//! Reviews are append-only per product. Ordering comes from the
//! inverted-time row key; sequencing across writers is the optimistic
//! last-seen check, best-effort only: two concurrent writers can both pass
//! the check before either writes, and no lock closes that window.

use std::sync::Arc;

use chrono::Utc;

use storefront_core::response::ServiceResponse;
use storefront_core::review::{
    check_last_seen, inverted_time_key, validate_comment, NewReview, Review, ReviewListing,
    ReviewPage,
};
use storefront_core::table::{Result, RowFilter, TableCursor, TableRow, TableStore};

const DEFAULT_NEWEST_COUNT: usize = 5;

/// Time-ordered review append, listing and paging for one table of reviews.
pub struct ReviewLedger {
    store: Arc<dyn TableStore<Review>>,
}

impl ReviewLedger {
    pub fn new(store: Arc<dyn TableStore<Review>>) -> Self {
        Self { store }
    }

    /// The newest `count` reviews (default 5), newest first.
    ///
    /// Ascending row-key order is newest-first, so this follows continuation
    /// cursors until the count is satisfied or the partition is exhausted.
    pub async fn list_newest(
        &self,
        product_name: &str,
        count: Option<usize>,
    ) -> ServiceResponse<Vec<ReviewListing>> {
        let count = count.unwrap_or(DEFAULT_NEWEST_COUNT);
        let filter = RowFilter::Partition(product_name.to_string());

        let mut reviews: Vec<Review> = Vec::new();
        let mut cursor: Option<TableCursor> = None;
        loop {
            let remaining = count.saturating_sub(reviews.len());
            let page = match self.store.query(&filter, Some(remaining), cursor.as_ref()).await {
                Ok(page) => page,
                Err(error) => {
                    tracing::error!(%error, product_name, "Review query failed");
                    return ServiceResponse::fail("There was an error getting the reviews.");
                }
            };
            reviews.extend(page.rows);

            if reviews.len() >= count {
                break;
            }
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        if reviews.is_empty() {
            return ServiceResponse::fail("There are no reviews for this product");
        }

        reviews.sort_by(|a, b| a.time_key.cmp(&b.time_key));
        reviews.truncate(count);
        ServiceResponse::data(reviews.iter().map(ReviewListing::of).collect())
    }

    /// Every review of a product, unprojected. Administrative use, not
    /// exposed over HTTP.
    #[allow(dead_code)]
    pub async fn list_all(&self, product_name: &str) -> Result<Vec<Review>> {
        self.store
            .scan_all(&RowFilter::Partition(product_name.to_string()))
            .await
    }

    /// One client-driven page starting from the supplied cursor pair.
    ///
    /// A single round-trip, no internal looping: the caller resumes with the
    /// returned cursor, one page at a time.
    pub async fn list_paged(
        &self,
        product_name: &str,
        count: usize,
        next_partition_key: Option<String>,
        next_row_key: Option<String>,
    ) -> ServiceResponse<ReviewPage> {
        let start = match (next_partition_key, next_row_key) {
            (Some(pk), Some(rk)) => Some(TableCursor::new(Review::TABLE, pk, rk)),
            _ => None,
        };
        let filter = RowFilter::Partition(product_name.to_string());

        match self.store.query(&filter, Some(count), start.as_ref()).await {
            Ok(page) => {
                let (next_pk, next_rk) = match page.next {
                    Some(cursor) => (Some(cursor.next_partition_key), Some(cursor.next_row_key)),
                    None => (None, None),
                };
                ServiceResponse::data(ReviewPage {
                    reviews: page.rows,
                    next_partition_key: next_pk,
                    next_row_key: next_rk,
                })
            }
            Err(error) => {
                tracing::error!(%error, product_name, "Review page query failed");
                ServiceResponse::fail("There was an error getting the reviews.")
            }
        }
    }

    /// Append a review under the optimistic last-seen check.
    ///
    /// On success the new row key comes back as data; the client supplies it
    /// as `expected_last_row_key` on its next append.
    pub async fn add(
        &self,
        expected_last_row_key: Option<String>,
        new: NewReview,
    ) -> ServiceResponse<String> {
        let newest = match self.newest_row_key(&new.product_name).await {
            Ok(newest) => newest,
            Err(error) => {
                tracing::error!(%error, product_name = new.product_name, "Newest-review lookup failed");
                return ServiceResponse::fail("There was an error adding the review.");
            }
        };

        if let Err(error) = check_last_seen(newest.as_deref(), expected_last_row_key.as_deref()) {
            return ServiceResponse::fail(error.to_string());
        }
        if let Err(error) = validate_comment(&new.comment) {
            return ServiceResponse::fail(error.to_string());
        }

        let now = Utc::now();
        let time_key = inverted_time_key(now);
        let review = Review {
            product_name: new.product_name,
            time_key: time_key.clone(),
            user_name: new.user_name,
            comment: new.comment,
            created_at: now,
        };

        match self.store.insert(&review).await {
            Ok(()) => ServiceResponse::ok_with("Review added successfully.", time_key),
            Err(error) => {
                tracing::error!(%error, "Review insert failed");
                ServiceResponse::fail("There was an error adding the review.")
            }
        }
    }

    /// Point delete by the exact (product, inverted row key) pair.
    pub async fn delete(
        &self,
        product_name: &str,
        inverted_row_key: &str,
    ) -> ServiceResponse<String> {
        match self.store.delete(product_name, inverted_row_key).await {
            Ok(()) => ServiceResponse::ok("Review deleted successfully"),
            Err(error) => {
                tracing::error!(%error, product_name, "Review delete failed");
                ServiceResponse::fail("There was an error deleting the review.")
            }
        }
    }

    /// Row key of the current newest review, via a 1-row query.
    async fn newest_row_key(&self, product_name: &str) -> Result<Option<String>> {
        let filter = RowFilter::Partition(product_name.to_string());
        let page = self.store.query(&filter, Some(1), None).await?;
        Ok(page.rows.first().map(|r| r.time_key.clone()))
    }
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
    use std::time::Duration;

    use crate::storage::InMemoryTableStore;
    use storefront_core::review::MAX_COMMENT_CHARS;

    fn ledger() -> (ReviewLedger, Arc<InMemoryTableStore<Review>>) {
        let store = Arc::new(InMemoryTableStore::new());
        (ReviewLedger::new(store.clone()), store)
    }

    fn ledger_with_page_size(page_size: usize) -> (ReviewLedger, Arc<InMemoryTableStore<Review>>) {
        let store = Arc::new(InMemoryTableStore::with_page_size(page_size));
        (ReviewLedger::new(store.clone()), store)
    }

    fn review_at(product: &str, user: &str, at: DateTime<Utc>) -> Review {
        Review {
            product_name: product.to_string(),
            time_key: inverted_time_key(at),
            user_name: user.to_string(),
            comment: format!("{user} on {product}"),
            created_at: at,
        }
    }

    fn new_review(product: &str, comment: &str) -> NewReview {
        NewReview {
            product_name: product.to_string(),
            user_name: "alice".to_string(),
            comment: comment.to_string(),
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_first_review_needs_no_cursor() {
        let (ledger, _) = ledger();

        let response = ledger.add(None, new_review("Apple", "Crisp.")).await;

        assert!(response.success);
        assert_eq!(response.message, "Review added successfully.");
        let key = response.data.unwrap();
        assert_eq!(key.len(), 19);
    }

    #[tokio::test]
    async fn test_append_with_matching_cursor_succeeds() {
        let (ledger, _) = ledger();

        let first = ledger.add(None, new_review("Apple", "Crisp.")).await;
        let first_key = first.data.unwrap();

        // Distinct wall-clock instant for the second row key.
        tokio::time::sleep(Duration::from_millis(2)).await;

        let second = ledger
            .add(Some(first_key), new_review("Apple", "Still crisp."))
            .await;
        assert!(second.success);
    }

    #[tokio::test]
    async fn test_append_with_stale_cursor_is_rejected() {
        let (ledger, _) = ledger();
        ledger.add(None, new_review("Apple", "Crisp.")).await;

        let response = ledger
            .add(Some("0000000000000000001".to_string()), new_review("Apple", "Late."))
            .await;

        assert!(!response.success);
        assert_eq!(
            response.message,
            "To add a new review, the client must provide the last review of the product."
        );
    }

    #[tokio::test]
    async fn test_append_without_cursor_is_rejected_when_reviews_exist() {
        let (ledger, _) = ledger();
        ledger.add(None, new_review("Apple", "Crisp.")).await;

        let response = ledger.add(None, new_review("Apple", "Late.")).await;

        assert!(!response.success);
    }

    #[tokio::test]
    async fn test_overlong_comment_is_rejected_even_with_matching_cursor() {
        let (ledger, _) = ledger();
        let first = ledger.add(None, new_review("Apple", "Crisp.")).await;

        let long_comment = "x".repeat(MAX_COMMENT_CHARS + 1);
        let response = ledger
            .add(first.data, new_review("Apple", &long_comment))
            .await;

        assert!(!response.success);
        assert_eq!(
            response.message,
            "The comment can be maximum 500 characters long."
        );
    }

    #[tokio::test]
    async fn test_comment_at_the_limit_is_accepted() {
        let (ledger, _) = ledger();

        let comment = "x".repeat(MAX_COMMENT_CHARS);
        let response = ledger.add(None, new_review("Apple", &comment)).await;

        assert!(response.success);
    }

    #[tokio::test]
    async fn test_list_newest_orders_newest_first_and_caps_count() {
        let (ledger, store) = ledger();
        for i in 0..8 {
            let at = base_time() + ChronoDuration::minutes(i);
            store
                .insert(&review_at("Apple", &format!("user{i}"), at))
                .await
                .unwrap();
        }

        let response = ledger.list_newest("Apple", None).await;

        assert!(response.success);
        let listings = response.data.unwrap();
        assert_eq!(listings.len(), 5);
        // Latest writer (minute 7) first.
        assert_eq!(listings[0].user_name, "user7");
        assert_eq!(listings[4].user_name, "user3");
    }

    #[tokio::test]
    async fn test_list_newest_ignores_other_products() {
        let (ledger, store) = ledger();
        store
            .insert(&review_at("Apple", "alice", base_time()))
            .await
            .unwrap();
        store
            .insert(&review_at("Banana", "bob", base_time()))
            .await
            .unwrap();

        let response = ledger.list_newest("Apple", Some(5)).await;

        let listings = response.data.unwrap();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].user_name, "alice");
    }

    #[tokio::test]
    async fn test_list_newest_follows_continuations() {
        let (ledger, store) = ledger_with_page_size(2);
        for i in 0..7 {
            let at = base_time() + ChronoDuration::minutes(i);
            store
                .insert(&review_at("Apple", &format!("user{i}"), at))
                .await
                .unwrap();
        }

        let response = ledger.list_newest("Apple", Some(5)).await;

        assert_eq!(response.data.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_list_newest_without_reviews_fails() {
        let (ledger, _) = ledger();

        let response = ledger.list_newest("Apple", None).await;

        assert!(!response.success);
        assert_eq!(response.message, "There are no reviews for this product");
    }

    #[tokio::test]
    async fn test_list_all_returns_raw_reviews() {
        let (ledger, store) = ledger_with_page_size(2);
        for i in 0..5 {
            let at = base_time() + ChronoDuration::minutes(i);
            store
                .insert(&review_at("Apple", &format!("user{i}"), at))
                .await
                .unwrap();
        }

        let reviews = ledger.list_all("Apple").await.unwrap();

        assert_eq!(reviews.len(), 5);
        assert!(reviews.iter().all(|r| r.product_name == "Apple"));
    }

    #[tokio::test]
    async fn test_list_paged_walks_the_partition_without_duplicates() {
        let (ledger, store) = ledger();
        for i in 0..5 {
            let at = base_time() + ChronoDuration::minutes(i);
            store
                .insert(&review_at("Apple", &format!("user{i}"), at))
                .await
                .unwrap();
        }

        let mut seen = Vec::new();
        let mut next_pk: Option<String> = None;
        let mut next_rk: Option<String> = None;
        loop {
            let response = ledger
                .list_paged("Apple", 2, next_pk.clone(), next_rk.clone())
                .await;
            assert!(response.success);
            let page = response.data.unwrap();
            seen.extend(page.reviews.iter().map(|r| r.user_name.clone()));

            if page.next_partition_key.is_none() {
                break;
            }
            next_pk = page.next_partition_key;
            next_rk = page.next_row_key;
        }

        assert_eq!(seen.len(), 5);
        let mut deduped = seen.clone();
        deduped.dedup();
        assert_eq!(seen, deduped);
    }

    #[tokio::test]
    async fn test_delete_then_list_reports_absence() {
        let (ledger, _) = ledger();
        let added = ledger.add(None, new_review("Apple", "Crisp.")).await;
        let key = added.data.unwrap();

        let deleted = ledger.delete("Apple", &key).await;
        assert!(deleted.success);
        assert_eq!(deleted.message, "Review deleted successfully");

        let after = ledger.list_newest("Apple", None).await;
        assert!(!after.success);
    }

    #[tokio::test]
    async fn test_delete_missing_review_still_succeeds() {
        let (ledger, _) = ledger();
        let response = ledger.delete("Apple", "0000000000000000001").await;
        assert!(response.success);
    }

    #[tokio::test]
    async fn test_row_keys_invert_chronological_order() {
        let (ledger, store) = ledger();
        let earlier = review_at("Apple", "early", base_time());
        let later = review_at("Apple", "late", base_time() + ChronoDuration::seconds(1));
        store.insert(&earlier).await.unwrap();
        store.insert(&later).await.unwrap();

        // Later instant sorts lexicographically first.
        assert!(later.row_key() < earlier.row_key());

        let listings = ledger.list_newest("Apple", None).await.data.unwrap();
        assert_eq!(listings[0].user_name, "late");
    }
}
