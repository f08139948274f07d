//! # Routes
//!
//! Axum router configuration for the checkout relay.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Create the main application router
///
/// Routes:
/// - GET  /health - Health check
/// - GET  /buy    - Create order, render checkout page
/// - POST /verify - Verify checkout completion signature
///
/// - Static pages (everything else, from `PUBLIC_DIR`):
///   - GET /             - Landing page
///   - GET /success.html - Verified payment
///   - GET /failure.html - Failed or unverifiable payment
pub fn create_router(state: AppState) -> Router {
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/buy", get(handlers::buy))
        .route("/verify", post(handlers::verify))
        // Static landing pages
        .fallback_service(public)
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
