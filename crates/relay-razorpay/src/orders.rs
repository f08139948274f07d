//! # Razorpay Orders
//!
//! Implementation of the Razorpay Orders API.
//! Every checkout opens one order; the widget then collects payment against it.

use crate::config::RazorpayConfig;
use async_trait::async_trait;
use chrono::DateTime;
use relay_core::{Currency, Order, OrderRequest, PaymentError, PaymentGateway, PaymentResult};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, error, info, instrument, warn};

const PROVIDER: &str = "razorpay";

/// Razorpay order gateway
///
/// Creates orders with HTTP basic auth (`key_id:key_secret`).
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: Client,
}

impl RazorpayGateway {
    /// Create a new Razorpay gateway
    pub fn new(config: RazorpayConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| {
                PaymentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    #[instrument(skip(self, request), fields(receipt = %request.receipt, amount = request.amount))]
    async fn create_order(&self, request: &OrderRequest) -> PaymentResult<Order> {
        if request.amount <= 0 {
            return Err(PaymentError::InvalidRequest(
                "Order amount must be positive".to_string(),
            ));
        }

        let url = format!("{}/v1/orders", self.config.api_base_url);

        debug!(
            "Creating Razorpay order: amount={}, currency={}",
            request.amount, request.currency
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(&self.config.key_secret))
            .json(request)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Razorpay API error: status={}, body={}", status, body);

            // Parse Razorpay error
            if let Ok(error_response) = serde_json::from_str::<RazorpayErrorResponse>(&body) {
                return Err(PaymentError::ProviderError {
                    provider: PROVIDER.to_string(),
                    message: error_response.error.message(),
                });
            }

            return Err(PaymentError::ProviderError {
                provider: PROVIDER.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let order_response: RazorpayOrderResponse =
            serde_json::from_str(&body).map_err(|e| {
                PaymentError::Serialization(format!("Failed to parse Razorpay response: {}", e))
            })?;

        if order_response.amount != request.amount || order_response.currency != request.currency
        {
            warn!(
                "Razorpay order {} recorded {} {} but {} {} was requested",
                order_response.id,
                order_response.amount,
                order_response.currency,
                request.amount,
                request.currency
            );
        }

        info!(
            "Created Razorpay order: id={}, status={:?}",
            order_response.id, order_response.status
        );

        Ok(order_response.into_order())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Razorpay API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct RazorpayOrderResponse {
    id: String,
    #[serde(default)]
    entity: Option<String>,
    amount: i64,
    currency: Currency,
    #[serde(default)]
    receipt: Option<String>,
    #[serde(default)]
    status: Option<String>,
    /// An object, or `[]` when the order has no notes
    #[serde(default)]
    notes: serde_json::Value,
    #[serde(default)]
    created_at: Option<i64>,
}

impl RazorpayOrderResponse {
    fn into_order(self) -> Order {
        let notes: BTreeMap<String, String> = self
            .notes
            .as_object()
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Order {
            id: self.id,
            entity: self.entity,
            amount: self.amount,
            currency: self.currency,
            receipt: self.receipt,
            status: self.status,
            notes,
            created_at: self.created_at.and_then(|ts| DateTime::from_timestamp(ts, 0)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorResponse {
    error: RazorpayError,
}

#[derive(Debug, Deserialize)]
struct RazorpayError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl RazorpayError {
    fn message(&self) -> String {
        match (&self.code, &self.description) {
            (Some(code), Some(description)) => format!("{}: {}", code, description),
            (None, Some(description)) => description.clone(),
            (Some(code), None) => code.clone(),
            (None, None) => "unknown error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_core::OrderNotes;
    use serde_json::json;
    use wiremock::matchers::{basic_auth, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn order_request() -> OrderRequest {
        OrderRequest {
            amount: 15000,
            currency: Currency::INR,
            receipt: "rcpt_1700000000000".to_string(),
            notes: OrderNotes {
                email: "asha@example.in".to_string(),
                name: "Asha".to_string(),
                phone: "9999999999".to_string(),
                product: "Yuvapreneur-Course".to_string(),
            },
        }
    }

    fn gateway(server: &MockServer) -> RazorpayGateway {
        let config =
            RazorpayConfig::new("rzp_test_abc", "secret_xyz").with_api_base_url(server.uri());
        RazorpayGateway::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_create_order() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .and(basic_auth("rzp_test_abc", "secret_xyz"))
            .and(body_json(json!({
                "amount": 15000,
                "currency": "INR",
                "receipt": "rcpt_1700000000000",
                "notes": {
                    "email": "asha@example.in",
                    "name": "Asha",
                    "phone": "9999999999",
                    "product": "Yuvapreneur-Course"
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "order_EKwxwAgItmmXdp",
                "entity": "order",
                "amount": 15000,
                "amount_paid": 0,
                "amount_due": 15000,
                "currency": "INR",
                "receipt": "rcpt_1700000000000",
                "status": "created",
                "attempts": 0,
                "notes": { "product": "Yuvapreneur-Course" },
                "created_at": 1582628071
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = gateway(&server).create_order(&order_request()).await.unwrap();

        assert_eq!(order.id, "order_EKwxwAgItmmXdp");
        assert_eq!(order.entity.as_deref(), Some("order"));
        assert_eq!(order.amount, 15000);
        assert_eq!(order.currency, Currency::INR);
        assert_eq!(order.status.as_deref(), Some("created"));
        assert_eq!(order.notes.get("product").map(String::as_str), Some("Yuvapreneur-Course"));
        assert_eq!(order.created_at.unwrap().timestamp(), 1582628071);
    }

    #[tokio::test]
    async fn test_empty_notes_array() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "order_1",
                "amount": 15000,
                "currency": "INR",
                "notes": []
            })))
            .mount(&server)
            .await;

        let order = gateway(&server).create_order(&order_request()).await.unwrap();
        assert!(order.notes.is_empty());
        assert!(order.receipt.is_none());
    }

    #[tokio::test]
    async fn test_gateway_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "code": "BAD_REQUEST_ERROR",
                    "description": "Authentication failed",
                    "source": "NA",
                    "step": "NA",
                    "reason": "NA",
                    "metadata": {}
                }
            })))
            .mount(&server)
            .await;

        let err = gateway(&server).create_order(&order_request()).await.unwrap_err();
        match err {
            PaymentError::ProviderError { provider, message } => {
                assert_eq!(provider, "razorpay");
                assert_eq!(message, "BAD_REQUEST_ERROR: Authentication failed");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = gateway(&server).create_order(&order_request()).await.unwrap_err();
        assert!(err.to_string().contains("502"));
        assert!(err.to_string().contains("bad gateway"));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/orders"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"entity\":\"order\"}"))
            .mount(&server)
            .await;

        let err = gateway(&server).create_order(&order_request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_unreachable_gateway() {
        // Nothing listens on port 9 on the loopback interface
        let config =
            RazorpayConfig::new("rzp_test_abc", "secret_xyz").with_api_base_url("http://127.0.0.1:9");
        let gateway = RazorpayGateway::new(config).unwrap();

        let err = gateway.create_order(&order_request()).await.unwrap_err();
        assert!(matches!(err, PaymentError::NetworkError(_)));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_amount() {
        let server = MockServer::start().await;
        let mut request = order_request();
        request.amount = 0;

        let err = gateway(&server).create_order(&request).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidRequest(_)));
    }
}
