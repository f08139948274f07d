//! # Payment Gateway Trait
//!
//! The seam between the HTTP layer and the payment provider.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │          PaymentGateway (trait)          │
//! │  ├── create_order()                      │
//! │  └── provider_name()                     │
//! └──────────────────────────────────────────┘
//!                      ▲
//!          ┌───────────┴───────────┐
//!  ┌───────┴───────┐       ┌───────┴───────┐
//!  │RazorpayGateway│       │  test doubles │
//!  └───────────────┘       └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::order::{Order, OrderRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// A payment provider that can open orders.
///
/// Implementations hold their own credentials and HTTP client. They perform
/// exactly one request per call and never retry.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order with the provider.
    ///
    /// # Arguments
    /// * `request` - Amount, currency, receipt and notes for the order
    ///
    /// # Returns
    /// The provider's `Order`, carrying the opaque order ID the checkout
    /// widget needs.
    async fn create_order(&self, request: &OrderRequest) -> PaymentResult<Order>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type BoxedPaymentGateway = Arc<dyn PaymentGateway>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PaymentError;
    use crate::order::{OrderNotes, OrderRequest};
    use crate::product::{Currency, Price};

    struct EchoGateway;

    #[async_trait]
    impl PaymentGateway for EchoGateway {
        async fn create_order(&self, request: &OrderRequest) -> PaymentResult<Order> {
            if request.amount <= 0 {
                return Err(PaymentError::InvalidRequest("amount must be positive".into()));
            }
            Ok(Order::new(format!("order_{}", request.receipt), request.price()))
        }

        fn provider_name(&self) -> &'static str {
            "echo"
        }
    }

    fn order_request(amount: i64) -> OrderRequest {
        OrderRequest {
            amount,
            currency: Currency::INR,
            receipt: "rcpt_1".to_string(),
            notes: OrderNotes {
                email: String::new(),
                name: String::new(),
                phone: String::new(),
                product: "Yuvapreneur-Course".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_gateway_as_trait_object() {
        let gateway: BoxedPaymentGateway = Arc::new(EchoGateway);

        let order = gateway.create_order(&order_request(49900)).await.unwrap();
        assert_eq!(order.id, "order_rcpt_1");
        assert_eq!(order.price(), Price::from_minor(49900, Currency::INR));
        assert_eq!(gateway.provider_name(), "echo");

        assert!(gateway.create_order(&order_request(0)).await.is_err());
    }
}
