//! # Payment Verification Types
//!
//! Wire types for the checkout widget's completion callback.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Reason reported when the callback lacks a field
pub const MISSING_FIELDS_REASON: &str = "missing_fields";

/// Callback payload posted by the browser after the customer pays
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerificationRequest {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

/// The three callback fields, all present and non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentProof<'a> {
    pub order_id: &'a str,
    pub payment_id: &'a str,
    pub signature: &'a str,
}

impl VerificationRequest {
    /// Check every field is present and non-empty
    pub fn proof(&self) -> PaymentResult<PaymentProof<'_>> {
        fn field(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }

        match (
            field(&self.razorpay_order_id),
            field(&self.razorpay_payment_id),
            field(&self.razorpay_signature),
        ) {
            (Some(order_id), Some(payment_id), Some(signature)) => Ok(PaymentProof {
                order_id,
                payment_id,
                signature,
            }),
            (order_id, payment_id, signature) => {
                let fields = [
                    ("razorpay_order_id", order_id),
                    ("razorpay_payment_id", payment_id),
                    ("razorpay_signature", signature),
                ]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name)
                .collect();
                Err(PaymentError::MissingFields { fields })
            }
        }
    }
}

/// Response body of the verification endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl VerificationResult {
    pub fn valid(valid: bool) -> Self {
        Self {
            valid,
            reason: None,
        }
    }

    /// Fail-closed result for any error
    pub fn invalid() -> Self {
        Self::valid(false)
    }

    pub fn missing_fields() -> Self {
        Self {
            valid: false,
            reason: Some(MISSING_FIELDS_REASON.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(order: Option<&str>, payment: Option<&str>, signature: Option<&str>) -> VerificationRequest {
        VerificationRequest {
            razorpay_order_id: order.map(String::from),
            razorpay_payment_id: payment.map(String::from),
            razorpay_signature: signature.map(String::from),
        }
    }

    #[test]
    fn test_complete_proof() {
        let req = request(Some("order_1"), Some("pay_1"), Some("abc"));
        let proof = req.proof().unwrap();
        assert_eq!(proof.order_id, "order_1");
        assert_eq!(proof.payment_id, "pay_1");
        assert_eq!(proof.signature, "abc");
    }

    #[test]
    fn test_missing_and_empty_fields() {
        let cases = [
            request(None, Some("pay_1"), Some("abc")),
            request(Some("order_1"), None, Some("abc")),
            request(Some("order_1"), Some("pay_1"), None),
            request(Some(""), Some("pay_1"), Some("abc")),
            request(Some("order_1"), Some("pay_1"), Some("")),
            VerificationRequest::default(),
        ];

        for case in cases {
            assert!(matches!(
                case.proof(),
                Err(PaymentError::MissingFields { .. })
            ));
        }
    }

    #[test]
    fn test_missing_fields_are_named() {
        let err = request(Some("order_1"), None, Some("")).proof().unwrap_err();
        match err {
            PaymentError::MissingFields { fields } => {
                assert_eq!(fields, vec!["razorpay_payment_id", "razorpay_signature"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_result_serialization() {
        assert_eq!(
            serde_json::to_value(VerificationResult::valid(true)).unwrap(),
            json!({ "valid": true })
        );
        assert_eq!(
            serde_json::to_value(VerificationResult::missing_fields()).unwrap(),
            json!({ "valid": false, "reason": "missing_fields" })
        );
    }
}
