//! # Razorpay Configuration
//!
//! Credentials for the Razorpay integration.
//! Loaded from environment variables, with development-only fallbacks.

use relay_core::PaymentError;
use std::env;
use std::fmt;

/// Key ID used when `RAZORPAY_KEY_ID` is unset. Development only.
pub const FALLBACK_KEY_ID: &str = "rzp_test_key_id";

/// Secret used when `RAZORPAY_KEY_SECRET` is unset. Development only.
pub const FALLBACK_KEY_SECRET: &str = "rzp_test_key_secret";

/// Production API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.razorpay.com";

/// Razorpay API configuration
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key ID (rzp_test_... or rzp_live_...), embedded in checkout pages
    pub key_id: String,

    /// Shared secret for API auth and payment signatures
    pub key_secret: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    uses_fallback_key_id: bool,
    uses_fallback_key_secret: bool,
}

impl RazorpayConfig {
    /// Load configuration from environment variables.
    ///
    /// Env vars:
    /// - `RAZORPAY_KEY_ID` (falls back to a test key)
    /// - `RAZORPAY_KEY_SECRET` (falls back to a test secret)
    /// - `RAZORPAY_API_BASE_URL` (optional)
    pub fn from_env() -> Result<Self, PaymentError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PaymentError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let key_id = var("RAZORPAY_KEY_ID");
        let key_secret = var("RAZORPAY_KEY_SECRET");

        let config = Self {
            uses_fallback_key_id: key_id.is_none(),
            uses_fallback_key_secret: key_secret.is_none(),
            key_id: key_id.unwrap_or_else(|| FALLBACK_KEY_ID.to_string()),
            key_secret: key_secret.unwrap_or_else(|| FALLBACK_KEY_SECRET.to_string()),
            api_base_url: var("RAZORPAY_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        };

        // Validate key format
        if !config.key_id.starts_with("rzp_test_") && !config.key_id.starts_with("rzp_live_") {
            return Err(PaymentError::Configuration(
                "RAZORPAY_KEY_ID must start with rzp_test_ or rzp_live_".to_string(),
            ));
        }

        Ok(config)
    }

    /// Create config with explicit values (for testing)
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            uses_fallback_key_id: false,
            uses_fallback_key_secret: false,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// True when either credential is a hardcoded development fallback
    pub fn uses_fallback_credentials(&self) -> bool {
        self.uses_fallback_key_id || self.uses_fallback_key_secret
    }

    /// Names of the variables that fell back to development values
    pub fn fallback_variables(&self) -> Vec<&'static str> {
        let mut vars = Vec::new();
        if self.uses_fallback_key_id {
            vars.push("RAZORPAY_KEY_ID");
        }
        if self.uses_fallback_key_secret {
            vars.push("RAZORPAY_KEY_SECRET");
        }
        vars
    }

    /// Refuse development fallbacks outside development
    pub fn ensure_production_ready(&self) -> Result<(), PaymentError> {
        if self.uses_fallback_credentials() {
            return Err(PaymentError::Configuration(format!(
                "{} must be set in production",
                self.fallback_variables().join(" and ")
            )));
        }
        Ok(())
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

impl fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("uses_fallback_credentials", &self.uses_fallback_credentials())
            .finish()
    }
}
