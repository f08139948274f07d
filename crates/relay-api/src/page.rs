//! # Checkout Page
//!
//! Renders the page that opens the Razorpay checkout widget.
//!
//! Every value that reaches the inline script goes through [`script_json`].
//! Values in HTML text go through [`escape_html`].

use relay_core::{
    CheckoutSettings, Currency, OrderRequest, PaymentError, PaymentResult, ResolvedCheckout,
};
use serde::Serialize;

/// Everything the page needs, borrowed from the handler
pub struct CheckoutPage<'a> {
    pub settings: &'a CheckoutSettings,
    pub key_id: &'a str,
    pub order_id: &'a str,
    pub checkout: &'a ResolvedCheckout,
    /// The request the order was created with; the page amount comes from here
    pub order_request: &'a OrderRequest,
}

#[derive(Serialize)]
struct WidgetOptions<'a> {
    key: &'a str,
    amount: i64,
    currency: Currency,
    name: &'a str,
    description: &'a str,
    order_id: &'a str,
    prefill: Prefill<'a>,
    notes: WidgetNotes<'a>,
    theme: Theme<'a>,
}

#[derive(Serialize)]
struct Prefill<'a> {
    name: &'a str,
    email: &'a str,
    contact: &'a str,
}

#[derive(Serialize)]
struct WidgetNotes<'a> {
    product: &'a str,
}

#[derive(Serialize)]
struct Theme<'a> {
    color: &'a str,
}

impl CheckoutPage<'_> {
    fn widget_options(&self) -> WidgetOptions<'_> {
        let customer = &self.checkout.customer;
        WidgetOptions {
            key: self.key_id,
            amount: self.order_request.amount,
            currency: self.order_request.currency,
            name: &self.settings.merchant_name,
            description: &self.checkout.product_label,
            order_id: self.order_id,
            prefill: Prefill {
                name: &customer.name,
                email: &customer.email,
                contact: &customer.phone,
            },
            notes: WidgetNotes {
                product: &self.checkout.product_label,
            },
            theme: Theme {
                color: &self.settings.theme_color,
            },
        }
    }

    /// Render the full HTML document
    pub fn render(&self) -> PaymentResult<String> {
        let settings = self.settings;
        let options = script_json(&self.widget_options())?;
        let success = script_json(&settings.success_path)?;
        let failure = script_json(&settings.failure_path)?;
        let dismiss = script_json(&settings.dismiss_path)?;

        let lang = escape_html(&settings.page_language);
        let title = escape_html(&settings.page_title);
        let script_url = escape_html(&settings.checkout_script_url);
        let theme = escape_html(&settings.theme_color);
        let amount = escape_html(&self.order_request.price().display());

        Ok(format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{title}</title>
  <script src="{script_url}"></script>
  <style>body{{font-family: sans-serif; padding: 24px;}} .btn{{background:{theme};color:#fff;padding:12px 16px;border:none;border-radius:4px;cursor:pointer}} .wrap{{max-width:520px;margin:40px auto;text-align:center}}</style>
</head>
<body>
<div class="wrap">
  <h2>{title}</h2>
  <p>राशि: {amount}</p>
  <button class="btn" id="payBtn">Pay Now</button>
</div>
<script>
  const options = Object.assign({options}, {{
    handler: async function (response) {{
      try {{
        const verifyRes = await fetch('/verify', {{ method: 'POST', headers: {{ 'Content-Type': 'application/json' }}, body: JSON.stringify(response) }});
        const data = await verifyRes.json();
        window.location.href = (data && data.valid) ? {success} : {failure};
      }} catch (e) {{ window.location.href = {failure}; }}
    }},
    modal: {{ ondismiss: function () {{ window.location.href = {dismiss}; }} }}
  }});
  document.getElementById('payBtn').addEventListener('click', function () {{ new Razorpay(options).open(); }});
</script>
</body>
</html>
"#
        ))
    }
}

/// Serialize a value as JSON that is safe inside an inline `<script>`.
///
/// `<`, `>` and `&` become unicode escapes so no string can close the
/// element or open a comment; U+2028/U+2029 are escaped for older JS parsers.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> PaymentResult<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| PaymentError::Serialization(format!("checkout page: {}", e)))?;

    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
