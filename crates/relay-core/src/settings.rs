//! # Checkout Settings
//!
//! Branding and pricing for the checkout page.
//! Defaults match the live storefront; `config/checkout.toml` may override any field.

use crate::error::{PaymentError, PaymentResult};
use crate::product::{Currency, Price};
use serde::{Deserialize, Serialize};

/// Storefront configuration shared by every checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutSettings {
    /// Merchant name shown in the checkout widget header
    pub merchant_name: String,

    /// Product label used when no bonus is being bought
    pub course_label: String,

    /// Prefix for bonus product labels ("Bonus-" + bonus id)
    pub bonus_label_prefix: String,

    /// Fallback price in major units
    pub default_price: i64,

    /// Currency for every order
    pub currency: Currency,

    /// Widget accent color
    pub theme_color: String,

    /// `lang` attribute of the checkout page
    pub page_language: String,

    /// Checkout page title and heading
    pub page_title: String,

    /// Gateway checkout widget script
    pub checkout_script_url: String,

    /// Redirect after a verified payment
    pub success_path: String,

    /// Redirect after a failed or unverifiable payment
    pub failure_path: String,

    /// Redirect when the customer closes the widget
    pub dismiss_path: String,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            merchant_name: "ThatCourse - युवा उद्यमी".to_string(),
            course_label: "Yuvapreneur-Course".to_string(),
            bonus_label_prefix: "Bonus-".to_string(),
            default_price: 499,
            currency: Currency::INR,
            theme_color: "#b22222".to_string(),
            page_language: "hi".to_string(),
            page_title: "भुगतान जारी रखें".to_string(),
            checkout_script_url: "https://checkout.razorpay.com/v1/checkout.js".to_string(),
            success_path: "/success.html".to_string(),
            failure_path: "/failure.html".to_string(),
            dismiss_path: "/".to_string(),
        }
    }
}

impl CheckoutSettings {
    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> PaymentResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| PaymentError::Configuration(format!("invalid checkout settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that could never produce a valid order
    pub fn validate(&self) -> PaymentResult<()> {
        if self.default_price <= 0 {
            return Err(PaymentError::Configuration(format!(
                "default_price must be positive, got {}",
                self.default_price
            )));
        }
        if Price::from_major(self.default_price, self.currency).is_none() {
            return Err(PaymentError::Configuration(format!(
                "default_price {} overflows {} minor units",
                self.default_price, self.currency
            )));
        }
        if self.course_label.is_empty() {
            return Err(PaymentError::Configuration(
                "course_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The fallback price in minor units
    pub fn default_price(&self) -> Price {
        // validate() guarantees the conversion fits; saturate rather than panic
        Price::from_major(self.default_price, self.currency)
            .unwrap_or(Price::from_minor(i64::MAX, self.currency))
    }
}
