//! # Payment Error Types
//!
//! Typed error handling for the checkout relay.
//! All payment operations return `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// One or more required verification fields were absent or empty
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Payment signature could not be computed
    #[error("Signature computation failed: {0}")]
    SignatureComputation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::MissingFields { .. } => 400,
            PaymentError::ProviderError { .. } => 502,
            PaymentError::NetworkError(_) => 503,
            PaymentError::SignatureComputation(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PaymentError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            PaymentError::MissingFields {
                fields: vec!["razorpay_order_id"]
            }
            .status_code(),
            400
        );
        assert_eq!(
            PaymentError::ProviderError {
                provider: "razorpay".into(),
                message: "Authentication failed".into()
            }
            .status_code(),
            502
        );
        assert_eq!(
            PaymentError::SignatureComputation("bad key".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_upstream_errors() {
        assert_eq!(PaymentError::NetworkError("timeout".into()).status_code(), 503);
        assert_eq!(PaymentError::Serialization("bad body".into()).status_code(), 500);
    }

    #[test]
    fn test_missing_fields_message() {
        let err = PaymentError::MissingFields {
            fields: vec!["razorpay_payment_id", "razorpay_signature"],
        };
        assert_eq!(
            err.to_string(),
            "Missing required fields: razorpay_payment_id, razorpay_signature"
        );
    }
}
