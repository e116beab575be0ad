//! Review ledger domain types and pure operations.

mod keys;
mod operations;
mod types;

pub use keys::{inverted_time_key, ticks, MAX_TICKS};
pub use operations::{check_last_seen, validate_comment, ReviewError, MAX_COMMENT_CHARS};
pub use types::{NewReview, Review, ReviewListing, ReviewPage};
