//! # Order Types
//!
//! Checkout request resolution and gateway order types.
//!
//! The amount is resolved exactly once, here, from the raw query values.
//! Both the order sent to the gateway and the rendered checkout page read it
//! from the resulting [`OrderRequest`].

use crate::product::{Currency, Price, Product};
use crate::settings::CheckoutSettings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters of a checkout request. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct CheckoutRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub bonus_id: Option<String>,
    /// Raw price in major units, parsed leniently by [`parse_price`]
    pub price: Option<String>,
}

/// Customer details used for widget prefill and order notes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub email: String,
    pub name: String,
    pub phone: String,
}

/// A checkout request with defaults applied and the amount fixed
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCheckout {
    pub customer: Customer,
    pub product: Product,
    pub product_label: String,
    pub price: Price,
}

impl CheckoutRequest {
    /// Build a request from decoded query pairs.
    ///
    /// A key that appears more than once keeps all of its values joined with
    /// `,`, so `bonusId=1&bonusId=2` labels the product `Bonus-1,2` and
    /// `price=150&price=9` parses as 150. Unknown keys are ignored.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut request = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "email" => &mut request.email,
                "name" => &mut request.name,
                "phone" => &mut request.phone,
                "bonusId" => &mut request.bonus_id,
                "price" => &mut request.price,
                _ => continue,
            };
            let value = value.into();
            match slot {
                Some(existing) => {
                    existing.push(',');
                    existing.push_str(&value);
                }
                None => *slot = Some(value),
            }
        }
        request
    }

    /// Apply defaults and fix the price.
    ///
    /// Missing, empty, non-positive, or unparseable prices use the configured
    /// default. So does a price whose minor-unit amount would overflow.
    pub fn resolve(&self, settings: &CheckoutSettings) -> ResolvedCheckout {
        let price = parse_price(self.price.as_deref())
            .and_then(|major| Price::from_major(major, settings.currency))
            .unwrap_or_else(|| settings.default_price());

        let product = Product::from_bonus_id(self.bonus_id.as_deref());
        let product_label = product.label(settings);

        ResolvedCheckout {
            customer: Customer {
                email: self.email.clone().unwrap_or_default(),
                name: self.name.clone().unwrap_or_default(),
                phone: self.phone.clone().unwrap_or_default(),
            },
            product,
            product_label,
            price,
        }
    }
}

/// Parse a price the way browsers' `parseInt(value, 10)` does: skip leading
/// whitespace, accept one sign, then take the leading run of ASCII digits.
///
/// Returns the value only if it is a positive `i64`.
pub fn parse_price(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return None;
    }

    let value: i64 = rest[..digits_len].parse().ok()?;
    (value > 0).then_some(value)
}

/// Receipt token attached to every order. Unique per millisecond only.
pub fn receipt_token(now: DateTime<Utc>) -> String {
    format!("rcpt_{}", now.timestamp_millis())
}

/// Free-form notes echoed to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderNotes {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub product: String,
}

/// Order creation request sent to the gateway
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Amount in minor units
    pub amount: i64,
    pub currency: Currency,
    pub receipt: String,
    pub notes: OrderNotes,
}

impl OrderRequest {
    /// Build the gateway request for a resolved checkout
    pub fn new(checkout: &ResolvedCheckout, now: DateTime<Utc>) -> Self {
        Self {
            amount: checkout.price.amount,
            currency: checkout.price.currency,
            receipt: receipt_token(now),
            notes: OrderNotes {
                email: checkout.customer.email.clone(),
                name: checkout.customer.name.clone(),
                phone: checkout.customer.phone.clone(),
                product: checkout.product_label.clone(),
            },
        }
    }

    pub fn price(&self) -> Price {
        Price::from_minor(self.amount, self.currency)
    }
}

/// An order created by the gateway. Never stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Gateway's opaque order ID
    pub id: String,

    /// Object kind reported by the gateway ("order")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Amount in minor units, as recorded by the gateway
    pub amount: i64,

    pub currency: Currency,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,

    /// Gateway status (e.g. "created")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub notes: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Create an order with only the required fields
    pub fn new(id: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            entity: None,
            amount: price.amount,
            currency: price.currency,
            receipt: None,
            status: None,
            notes: BTreeMap::new(),
            created_at: None,
        }
    }

    pub fn price(&self) -> Price {
        Price::from_minor(self.amount, self.currency)
    }
}
