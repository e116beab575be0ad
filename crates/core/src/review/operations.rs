use thiserror::Error;

/// Longest comment a review may carry.
pub const MAX_COMMENT_CHARS: usize = 500;

/// Domain-rule violations when appending a review.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("The comment can be maximum {MAX_COMMENT_CHARS} characters long.")]
    CommentTooLong,
    #[error("To add a new review, the client must provide the last review of the product.")]
    LastReviewMismatch,
}

/// Rejects comments longer than [`MAX_COMMENT_CHARS`].
pub fn validate_comment(comment: &str) -> Result<(), ReviewError> {
    if comment.chars().count() > MAX_COMMENT_CHARS {
        return Err(ReviewError::CommentTooLong);
    }
    Ok(())
}

/// The optimistic-concurrency guard on review appends.
///
/// When the ledger already holds a newest review, the caller must have
/// observed it: the supplied key has to equal the current newest row key. A
/// ledger with no reviews accepts any caller. Best-effort sequencing only;
/// two writers can both pass this check before either writes.
pub fn check_last_seen(newest: Option<&str>, supplied: Option<&str>) -> Result<(), ReviewError> {
    match newest {
        Some(latest) if supplied != Some(latest) => Err(ReviewError::LastReviewMismatch),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_at_limit_is_accepted() {
        let comment = "x".repeat(MAX_COMMENT_CHARS);
        assert!(validate_comment(&comment).is_ok());
    }

    #[test]
    fn test_comment_over_limit_is_rejected() {
        let comment = "x".repeat(MAX_COMMENT_CHARS + 1);
        assert_eq!(
            validate_comment(&comment),
            Err(ReviewError::CommentTooLong)
        );
    }

    #[test]
    fn test_comment_length_counts_characters_not_bytes() {
        // 500 multi-byte characters stay within the limit.
        let comment = "é".repeat(MAX_COMMENT_CHARS);
        assert!(validate_comment(&comment).is_ok());
    }

    #[test]
    fn test_first_review_accepts_any_cursor() {
        assert!(check_last_seen(None, None).is_ok());
        assert!(check_last_seen(None, Some("anything")).is_ok());
    }

    #[test]
    fn test_matching_cursor_passes() {
        assert!(check_last_seen(Some("key-1"), Some("key-1")).is_ok());
    }

    #[test]
    fn test_stale_cursor_is_rejected() {
        assert_eq!(
            check_last_seen(Some("key-2"), Some("key-1")),
            Err(ReviewError::LastReviewMismatch)
        );
    }

    #[test]
    fn test_missing_cursor_is_rejected_when_reviews_exist() {
        assert_eq!(
            check_last_seen(Some("key-1"), None),
            Err(ReviewError::LastReviewMismatch)
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ReviewError::CommentTooLong.to_string(),
            "The comment can be maximum 500 characters long."
        );
        assert_eq!(
            ReviewError::LastReviewMismatch.to_string(),
            "To add a new review, the client must provide the last review of the product."
        );
    }
}
