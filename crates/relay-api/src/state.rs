//! # Application State
//!
//! Shared state for the Axum application.
//! Built once at startup and never mutated afterwards.

use relay_core::{BoxedPaymentGateway, CheckoutSettings};
use relay_razorpay::{RazorpayConfig, RazorpayGateway, SignatureVerifier};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Directory of static pages (success/failure landing pages)
    pub public_dir: PathBuf,
    /// Explicit checkout settings file
    pub settings_path: Option<PathBuf>,
    /// Log output format
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(3000),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            public_dir: var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("public")),
            settings_path: var("CHECKOUT_SETTINGS_PATH").map(PathBuf::from),
            log_format: match var("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order gateway
    pub gateway: BoxedPaymentGateway,
    /// Checkout callback verifier
    pub verifier: SignatureVerifier,
    /// Public key id embedded in checkout pages
    pub key_id: Arc<str>,
    /// Storefront branding and pricing
    pub settings: Arc<CheckoutSettings>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create state backed by Razorpay, reading credentials from the environment
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let razorpay = RazorpayConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Razorpay config: {}", e))?;

        if razorpay.uses_fallback_credentials() {
            if config.is_production() {
                razorpay.ensure_production_ready()?;
            }
            warn!(
                "Using development fallback for {}; never deploy like this",
                razorpay.fallback_variables().join(", ")
            );
        }

        info!(
            "Razorpay key {} ({} mode)",
            razorpay.key_id,
            if razorpay.is_test_mode() { "test" } else { "live" }
        );

        let settings = load_checkout_settings(config.settings_path.as_deref())?;
        let verifier = SignatureVerifier::from_config(&razorpay);
        let key_id = razorpay.key_id.clone();

        let gateway = RazorpayGateway::new(razorpay)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Razorpay: {}", e))?;

        Ok(Self::from_parts(
            Arc::new(gateway),
            verifier,
            key_id,
            settings,
            config,
        ))
    }

    /// Assemble state from already-built parts (tests, alternative gateways)
    pub fn from_parts(
        gateway: BoxedPaymentGateway,
        verifier: SignatureVerifier,
        key_id: impl Into<Arc<str>>,
        settings: CheckoutSettings,
        config: AppConfig,
    ) -> Self {
        Self {
            gateway,
            verifier,
            key_id: key_id.into(),
            settings: Arc::new(settings),
            config,
        }
    }
}

/// Load checkout settings from an explicit path or the usual config locations
fn load_checkout_settings(explicit: Option<&Path>) -> anyhow::Result<CheckoutSettings> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let settings = CheckoutSettings::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        info!("Loaded checkout settings from {}", path.display());
        return Ok(settings);
    }

    // Try to load from config/checkout.toml
    let config_paths = [
        "config/checkout.toml",
        "../config/checkout.toml",
        "../../config/checkout.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let settings = CheckoutSettings::from_toml_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            info!("Loaded checkout settings from {}", path);
            return Ok(settings);
        }
    }

    info!("No checkout settings file found, using defaults");
    Ok(CheckoutSettings::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.public_dir, PathBuf::from("public"));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(!config.is_production());
    }

    #[test]
    fn test_app_config_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("PORT", "8080"),
            ("ENVIRONMENT", "production"),
            ("LOG_FORMAT", "json"),
            ("PUBLIC_DIR", "/srv/public"),
        ]
        .into_iter()
        .collect();

        let config = AppConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.port, 8080);
        assert!(config.is_production());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.public_dir, PathBuf::from("/srv/public"));
    }

    #[test]
    fn test_unparseable_port_uses_default() {
        let config = AppConfig::from_lookup(|name| (name == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            ..AppConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3000");

        let config = AppConfig {
            host: "not a host".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_explicit_settings_path() {
        let path = std::env::temp_dir().join(format!("checkout-settings-{}.toml", std::process::id()));
        std::fs::write(&path, "course_label = \"Test-Course\"\ndefault_price = 199\n").unwrap();

        let settings = load_checkout_settings(Some(&path)).unwrap();
        assert_eq!(settings.course_label, "Test-Course");
        assert_eq!(settings.default_price().amount, 19900);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_explicit_settings_path_fails() {
        let path = Path::new("/nonexistent/checkout.toml");
        assert!(load_checkout_settings(Some(path)).is_err());
    }
}
