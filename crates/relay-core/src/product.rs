//! # Product Types
//!
//! Money and product types for the checkout relay.
//! Prices are whole major units on input and minor units everywhere else.

use crate::settings::CheckoutSettings;
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217). The storefront sells in rupees only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
}

impl Currency {
    /// Returns the ISO 4217 currency code as the gateway expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::INR => "INR",
        }
    }

    /// Minor units per major unit (paise per rupee)
    pub fn minor_units(&self) -> i64 {
        100
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::INR
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price with amount in smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in smallest currency unit (paise for INR)
    pub amount: i64,
    /// Currency
    pub currency: Currency,
}

impl Price {
    /// Create a price from a whole number of major units.
    ///
    /// Returns `None` if the minor-unit amount does not fit in an `i64`.
    pub fn from_major(major: i64, currency: Currency) -> Option<Self> {
        major
            .checked_mul(currency.minor_units())
            .map(|amount| Self { amount, currency })
    }

    /// Create a price from smallest unit
    pub fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Whole major units (the minor remainder is dropped)
    pub fn major(&self) -> i64 {
        self.amount / self.currency.minor_units()
    }

    /// Format for display (e.g., "₹499", "₹12.50")
    pub fn display(&self) -> String {
        let units = self.currency.minor_units();
        let rem = self.amount % units;
        if rem == 0 {
            format!("{}{}", self.currency.symbol(), self.major())
        } else {
            format!("{}{}.{:02}", self.currency.symbol(), self.major(), rem.abs())
        }
    }
}

/// What the customer is buying
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Product {
    /// The main course
    Course,
    /// A bonus item referenced by its identifier
    Bonus(String),
}

impl Product {
    /// Pick the product from an optional bonus identifier.
    /// An empty identifier counts as absent.
    pub fn from_bonus_id(bonus_id: Option<&str>) -> Self {
        match bonus_id {
            Some(id) if !id.is_empty() => Product::Bonus(id.to_string()),
            _ => Product::Course,
        }
    }

    /// Label sent to the gateway and shown in the checkout widget
    pub fn label(&self, settings: &CheckoutSettings) -> String {
        match self {
            Product::Course => settings.course_label.clone(),
            Product::Bonus(id) => format!("{}{}", settings.bonus_label_prefix, id),
        }
    }
}
