//! # relay-razorpay
//!
//! Razorpay gateway strategy for checkout-relay.
//!
//! This crate provides:
//!
//! 1. **RazorpayGateway** - Orders API client implementing `PaymentGateway`
//!    - Basic auth with the key id and secret
//!    - Amount, currency, receipt and notes per order
//!
//! 2. **SignatureVerifier** - Checkout completion signatures
//!    - HMAC-SHA256 over `order_id|payment_id`
//!    - Constant-time comparison
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use relay_razorpay::{RazorpayConfig, RazorpayGateway, SignatureVerifier};
//! use relay_core::PaymentGateway;
//!
//! let config = RazorpayConfig::from_env()?;
//! let verifier = SignatureVerifier::from_config(&config);
//! let gateway = RazorpayGateway::new(config)?;
//!
//! let order = gateway.create_order(&request).await?;
//!
//! // Later, from the widget callback:
//! let valid = verifier.verify(&callback.proof()?)?;
//! ```

pub mod config;
pub mod orders;
pub mod signature;

// Re-exports
pub use config::RazorpayConfig;
pub use orders::RazorpayGateway;
pub use signature::{compute_signature, SignatureVerifier};
