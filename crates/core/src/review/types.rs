use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::TableRow;

/// A stored review. Partitioned by product name; the row key is the
/// inverted-time key, so within a partition ascending row-key order is
/// newest-first. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub product_name: String,
    pub time_key: String,
    pub user_name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl TableRow for Review {
    const TABLE: &'static str = "Reviews";
    const ENTITY: &'static str = "Review";

    fn partition_key(&self) -> &str {
        &self.product_name
    }

    fn row_key(&self) -> &str {
        &self.time_key
    }
}

/// Caller input for appending a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub product_name: String,
    pub user_name: String,
    pub comment: String,
}

/// Public projection of a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewListing {
    pub user_name: String,
    pub comment: String,
}

impl ReviewListing {
    pub fn of(review: &Review) -> Self {
        Self {
            user_name: review.user_name.clone(),
            comment: review.comment.clone(),
        }
    }
}

/// One client-driven page of reviews plus the cursor pair to resume from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPage {
    pub reviews: Vec<Review>,
    pub next_partition_key: Option<String>,
    pub next_row_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_table_row_keys() {
        let review = Review {
            product_name: "Apple".to_string(),
            time_key: "0000000000000000001".to_string(),
            user_name: "alice".to_string(),
            comment: "Crisp and sweet.".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(review.partition_key(), "Apple");
        assert_eq!(review.row_key(), "0000000000000000001");
        assert_eq!(Review::TABLE, "Reviews");
    }

    #[test]
    fn test_listing_projects_user_and_comment_only() {
        let review = Review {
            product_name: "Apple".to_string(),
            time_key: "0000000000000000001".to_string(),
            user_name: "alice".to_string(),
            comment: "Crisp and sweet.".to_string(),
            created_at: Utc::now(),
        };

        let listing = ReviewListing::of(&review);

        assert_eq!(listing.user_name, "alice");
        assert_eq!(listing.comment, "Crisp and sweet.");
    }
}
