//! # checkout-relay
//!
//! Razorpay checkout relay.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export RAZORPAY_KEY_ID=rzp_live_...
//! export RAZORPAY_KEY_SECRET=...
//! export ENVIRONMENT=production
//!
//! # Run the server
//! checkout-relay
//! ```

use relay_api::{routes, state::AppState, AppConfig, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    init_logging(config.log_format);

    // Print banner
    print_banner();

    let addr = config.socket_addr()?;
    let is_prod = config.is_production();

    // Initialize application state
    let state = AppState::new(config)?;

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.gateway.provider_name());
    info!("Static pages: {}", state.config.public_dir.display());

    // Create router
    let app = routes::create_router(state);

    info!("Server listening on http://{}", addr);

    if !is_prod {
        info!("Checkout: GET http://{}/buy?price=499", addr);
        info!("Verify:   POST http://{}/verify", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

fn print_banner() {
    println!(
        r#"
  checkout-relay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Razorpay checkout relay
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
