//! # relay-api
//!
//! HTTP API layer for checkout-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Checkout page rendering for the Razorpay widget
//! - Payment signature verification endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/buy` | Create order, render checkout page |
//! | POST | `/verify` | Verify payment signature |
//! | GET | `/*` | Static pages from `PUBLIC_DIR` |

pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
