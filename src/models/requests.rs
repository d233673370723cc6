//! Request DTOs for the admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// Request body for PUT /caches/:name/max-size
///
/// Signed so that a negative size is reported as an invalid request rather
/// than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// New maximum number of entries
    pub max_size: i64,
}

impl ResizeRequest {
    /// Validates the request and returns the size to apply.
    pub fn validate(&self) -> Result<usize, String> {
        usize::try_from(self.max_size)
            .map_err(|_| format!("max_size must not be negative, got {}", self.max_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_request_deserialize() {
        let req: ResizeRequest = serde_json::from_str(r#"{"max_size": 10}"#).unwrap();
        assert_eq!(req.max_size, 10);
        assert_eq!(req.validate(), Ok(10));
    }

    #[test]
    fn test_validate_zero_size() {
        let req = ResizeRequest { max_size: 0 };
        assert_eq!(req.validate(), Ok(0));
    }

    #[test]
    fn test_validate_negative_size() {
        let req = ResizeRequest { max_size: -1 };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_field_rejected() {
        assert!(serde_json::from_str::<ResizeRequest>(r#"{}"#).is_err());
    }
}
