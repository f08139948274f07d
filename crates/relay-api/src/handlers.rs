//! # Request Handlers
//!
//! Axum request handlers for the checkout relay.
//! Errors never reach the response body; they are logged here instead.

use crate::page::CheckoutPage;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, FromRequest, Query, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Form, Json,
};
use chrono::Utc;
use relay_core::{CheckoutRequest, OrderRequest, VerificationRequest, VerificationResult};
use tracing::{debug, error, info, instrument, warn};

/// Body of every failed `/buy` response
pub const ORDER_ERROR_MESSAGE: &str = "Error creating order";

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// Create an order and render the checkout page.
///
/// The query string never rejects a request: repeated keys are joined and an
/// undecodable query is treated as empty, so every field takes its default.
#[instrument(skip(state, query))]
pub async fn buy(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(e) => {
            debug!("Unreadable checkout query: {}", e);
            Vec::new()
        }
    };
    let checkout = CheckoutRequest::from_query_pairs(pairs).resolve(&state.settings);
    let order_request = OrderRequest::new(&checkout, Utc::now());

    info!(
        "Creating order: product={}, total={}, receipt={}",
        checkout.product_label,
        order_request.price().display(),
        order_request.receipt
    );

    let order = state
        .gateway
        .create_order(&order_request)
        .await
        .map_err(|e| {
            error!(
                "Error creating order with {}: {}",
                state.gateway.provider_name(),
                e
            );
            (StatusCode::INTERNAL_SERVER_ERROR, ORDER_ERROR_MESSAGE)
        })?;

    let html = CheckoutPage {
        settings: &state.settings,
        key_id: &state.key_id,
        order_id: &order.id,
        checkout: &checkout,
        order_request: &order_request,
    }
    .render()
    .map_err(|e| {
        error!("Failed to render checkout page for {}: {}", order.id, e);
        (StatusCode::INTERNAL_SERVER_ERROR, ORDER_ERROR_MESSAGE)
    })?;

    info!("Rendered checkout for order {}", order.id);

    Ok(Html(html))
}

/// Verify the checkout widget's completion callback.
///
/// Form-encoded bodies (the widget's redirect mode) and JSON bodies are both
/// accepted. Any body that does not deserialize is treated like an empty one,
/// so it ends up as a missing-fields rejection.
#[instrument(skip(state, request))]
pub async fn verify(
    State(state): State<AppState>,
    request: Request,
) -> (StatusCode, Json<VerificationResult>) {
    let request = read_verification(request).await;

    // `proof` only fails on absent or empty fields
    let proof = match request.proof() {
        Ok(proof) => proof,
        Err(e) => {
            warn!("Rejected verification: {}", e);
            return (StatusCode::BAD_REQUEST, Json(VerificationResult::missing_fields()));
        }
    };

    match state.verifier.verify(&proof) {
        Ok(true) => {
            info!("Payment {} verified for order {}", proof.payment_id, proof.order_id);
            (StatusCode::OK, Json(VerificationResult::valid(true)))
        }
        Ok(false) => {
            warn!(
                "Signature mismatch for payment {} on order {}",
                proof.payment_id, proof.order_id
            );
            (StatusCode::OK, Json(VerificationResult::valid(false)))
        }
        Err(e) => {
            error!("Verify error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(VerificationResult::invalid()))
        }
    }
}

/// Decode a verification body by content type, falling back to an empty request
async fn read_verification(request: Request) -> VerificationRequest {
    let is_form = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        return match Form::<VerificationRequest>::from_request(request, &()).await {
            Ok(Form(body)) => body,
            Err(e) => {
                debug!("Unreadable verification form: {}", e);
                VerificationRequest::default()
            }
        };
    }

    let body = match Bytes::from_request(request, &()).await {
        Ok(body) => body,
        Err(e) => {
            debug!("Unreadable verification body: {}", e);
            return VerificationRequest::default();
        }
    };
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        debug!("Unreadable verification body: {}", e);
        VerificationRequest::default()
    })
}
