//! # Razorpay Payment Signatures
//!
//! After a successful payment the checkout widget hands the browser
//! `razorpay_order_id`, `razorpay_payment_id` and `razorpay_signature`.
//! The signature is `hex(HMAC-SHA256(key_secret, order_id + "|" + payment_id))`.
//!
//! Only the identifier pair is authenticated. The amount and currency of the
//! order are not part of the signed message and are not checked here.

use crate::config::RazorpayConfig;
use hmac::{Hmac, Mac};
use relay_core::{PaymentError, PaymentProof, PaymentResult};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected signature for an order/payment pair
pub fn compute_signature(secret: &str, order_id: &str, payment_id: &str) -> PaymentResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| PaymentError::SignatureComputation(e.to_string()))?;
    mac.update(order_id.as_bytes());
    mac.update(b"|");
    mac.update(payment_id.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies payment callbacks against the shared secret
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn from_config(config: &RazorpayConfig) -> Self {
        Self::new(config.key_secret.clone())
    }

    /// Returns whether the proof's signature matches.
    ///
    /// `Err` only when the expected signature cannot be computed; callers
    /// must treat that as invalid.
    #[instrument(skip(self, proof), fields(order_id = %proof.order_id, payment_id = %proof.payment_id))]
    pub fn verify(&self, proof: &PaymentProof<'_>) -> PaymentResult<bool> {
        let expected = compute_signature(&self.secret, proof.order_id, proof.payment_id)?;
        let valid: bool = expected.as_bytes().ct_eq(proof.signature.as_bytes()).into();

        debug!("Payment signature checked: valid={}", valid);
        Ok(valid)
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "rzp_test_key_secret";
    const ORDER_ID: &str = "order_EKwxwAgItmmXdp";
    const PAYMENT_ID: &str = "pay_29QQoUBi66xm2f";
    // python3: hmac.new(SECRET, b"order_EKwxwAgItmmXdp|pay_29QQoUBi66xm2f", sha256).hexdigest()
    const EXPECTED: &str = "2a8deda44cf509878f8fcd119e2babc80449d015f23d9cdfd195681dcac5016b";

    fn proof(signature: &str) -> PaymentProof<'_> {
        PaymentProof {
            order_id: ORDER_ID,
            payment_id: PAYMENT_ID,
            signature,
        }
    }

    #[test]
    fn test_matches_reference_hmac() {
        let sig = compute_signature(SECRET, ORDER_ID, PAYMENT_ID).unwrap();
        assert_eq!(sig, EXPECTED);
    }

    #[test]
    fn test_known_hmac_vector() {
        let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
        mac.update(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(
            hex::encode(mac.finalize().into_bytes()),
            "f7bc83f430538424b13298e6aa6fb143ef4d59a14946175997479dbc2d1a3cd8"
        );
    }

    #[test]
    fn test_verify_valid_signature() {
        let verifier = SignatureVerifier::new(SECRET);
        assert!(verifier.verify(&proof(EXPECTED)).unwrap());
    }

    #[test]
    fn test_every_single_bit_flip_is_rejected() {
        let verifier = SignatureVerifier::new(SECRET);
        let digest = hex::decode(EXPECTED).unwrap();

        for byte in 0..digest.len() {
            for bit in 0..8 {
                let mut tampered = digest.clone();
                tampered[byte] ^= 1 << bit;
                let signature = hex::encode(&tampered);
                assert!(
                    !verifier.verify(&proof(&signature)).unwrap(),
                    "flip of byte {} bit {} was accepted",
                    byte,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_rejects_wrong_secret_and_swapped_ids() {
        let verifier = SignatureVerifier::new("another_secret");
        assert!(!verifier.verify(&proof(EXPECTED)).unwrap());

        let verifier = SignatureVerifier::new(SECRET);
        let swapped = PaymentProof {
            order_id: PAYMENT_ID,
            payment_id: ORDER_ID,
            signature: EXPECTED,
        };
        assert!(!verifier.verify(&swapped).unwrap());
    }

    #[test]
    fn test_rejects_case_and_length_variants() {
        let verifier = SignatureVerifier::new(SECRET);
        assert!(!verifier.verify(&proof(&EXPECTED.to_uppercase())).unwrap());
        assert!(!verifier.verify(&proof(&EXPECTED[..63])).unwrap());
        assert!(!verifier.verify(&proof(&format!("{}0", EXPECTED))).unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let verifier = SignatureVerifier::new("very_secret_value");
        assert!(!format!("{:?}", verifier).contains("very_secret_value"));
    }
}
