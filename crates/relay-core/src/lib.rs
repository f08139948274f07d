//! # relay-core
//!
//! Core types and traits for the checkout relay.
//!
//! This crate provides:
//! - `PaymentGateway` trait for payment providers that open orders
//! - `CheckoutRequest` resolution into a fixed `Price` and product label
//! - `OrderRequest` and `Order` for the gateway round trip
//! - `VerificationRequest` and `VerificationResult` for the completion callback
//! - `CheckoutSettings` for storefront branding and pricing
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CheckoutRequest, CheckoutSettings, OrderRequest, PaymentGateway};
//!
//! let settings = CheckoutSettings::default();
//! let checkout = query.resolve(&settings);
//!
//! let request = OrderRequest::new(&checkout, chrono::Utc::now());
//! let order = gateway.create_order(&request).await?;
//!
//! // Render the checkout page with order.id and request.amount
//! ```

pub mod error;
pub mod gateway;
pub mod order;
pub mod product;
pub mod settings;
pub mod verification;

// Re-exports for convenience
pub use error::{PaymentError, PaymentResult};
pub use gateway::{BoxedPaymentGateway, PaymentGateway};
pub use order::{
    parse_price, receipt_token, CheckoutRequest, Customer, Order, OrderNotes, OrderRequest,
    ResolvedCheckout,
};
pub use product::{Currency, Price, Product};
pub use settings::CheckoutSettings;
pub use verification::{
    PaymentProof, VerificationRequest, VerificationResult, MISSING_FIELDS_REASON,
};
