//! The uniform response envelope.
//!
//! Every caller-facing service operation returns a [`ServiceResponse`]; it is
//! the only channel for signaling success or failure. The HTTP shell maps it
//! to a status code with the pure [`ServiceResponse::status_code`] function:
//! success envelopes become 200 OK, failure envelopes 400 Bad Request.

use serde::{Deserialize, Serialize};

/// Success/message/data wrapper returned by every service operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ServiceResponse<T> {
    /// Success carrying a message only.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Success carrying data.
    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success carrying data and no message, the shape the read operations
    /// use.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }

    /// Failure with a descriptive message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// HTTP status for this envelope: 200 on success, 400 on failure.
    pub fn status_code(&self) -> u16 {
        if self.success {
            200
        } else {
            400
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_has_no_data() {
        let response: ServiceResponse<String> = ServiceResponse::ok("Product added successfully.");
        assert!(response.success);
        assert_eq!(response.message, "Product added successfully.");
        assert!(response.data.is_none());
    }

    #[test]
    fn test_ok_with_carries_data() {
        let response = ServiceResponse::ok_with("Review added successfully.", "key-1".to_string());
        assert!(response.success);
        assert_eq!(response.data.as_deref(), Some("key-1"));
    }

    #[test]
    fn test_data_leaves_message_empty() {
        let response = ServiceResponse::data(vec![1, 2, 3]);
        assert!(response.success);
        assert_eq!(response.message, "");
        assert_eq!(response.data, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_fail_has_no_data() {
        let response: ServiceResponse<()> = ServiceResponse::fail("There are no products to show.");
        assert!(!response.success);
        assert!(response.data.is_none());
    }

    #[test]
    fn test_success_maps_to_200() {
        let response: ServiceResponse<()> = ServiceResponse::ok("done");
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn test_failure_maps_to_400() {
        let response: ServiceResponse<()> = ServiceResponse::fail("nope");
        assert_eq!(response.status_code(), 400);
    }

    #[test]
    fn test_envelope_wire_shape() {
        let response: ServiceResponse<u32> = ServiceResponse::ok_with("found", 7);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "found", "data": 7})
        );
    }
}
