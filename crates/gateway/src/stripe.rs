//! Stripe-backed payment gateway client.
//!
//! Talks to the coupons and checkout-sessions endpoints using Stripe's
//! form-encoded wire conventions.

use async_trait::async_trait;
use common::Money;
use serde::Deserialize;

use crate::{
    error::{GatewayError, Result},
    types::{CheckoutRequest, CheckoutSession, Coupon, PaymentGateway},
};

const DEFAULT_API_BASE: &str = "https://api.stripe.com/v1";

/// Currency for every coupon and line item. The storefront prices in
/// rupees.
const CURRENCY: &str = "inr";

/// Payment gateway client backed by the Stripe HTTP API.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    secret_key: String,
    api_base: String,
}

impl StripeGateway {
    /// Creates a client using the given secret key against the live API.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self::with_api_base(secret_key, DEFAULT_API_BASE)
    }

    /// Creates a client pointed at a different API base (test servers).
    pub fn with_api_base(secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            api_base: api_base.into(),
        }
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.secret_key)
            .form(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn coupon_params(amount_off: Money) -> Vec<(String, String)> {
    vec![
        ("amount_off".to_string(), amount_off.minor_units().to_string()),
        ("currency".to_string(), CURRENCY.to_string()),
        ("duration".to_string(), "once".to_string()),
    ]
}

fn session_params(request: &CheckoutRequest) -> Vec<(String, String)> {
    let mut params = Vec::new();

    for (i, item) in request.line_items.iter().enumerate() {
        params.push((
            format!("line_items[{i}][price_data][currency]"),
            CURRENCY.to_string(),
        ));
        params.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            item.name.clone(),
        ));
        params.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            item.unit_amount.minor_units().to_string(),
        ));
        params.push((format!("line_items[{i}][quantity]"), item.quantity.to_string()));
    }

    params.push(("mode".to_string(), "payment".to_string()));
    params.push(("discounts[0][coupon]".to_string(), request.coupon.clone()));
    params.push(("success_url".to_string(), request.success_url.clone()));
    params.push(("cancel_url".to_string(), request.cancel_url.clone()));

    params
}

#[derive(Deserialize)]
struct CouponObject {
    id: String,
}

#[derive(Deserialize)]
struct SessionObject {
    id: String,
    url: Option<String>,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    #[tracing::instrument(skip(self))]
    async fn create_coupon(&self, amount_off: Money) -> Result<Coupon> {
        let coupon: CouponObject = self
            .post_form("/coupons", &coupon_params(amount_off))
            .await?;

        Ok(Coupon { id: coupon.id })
    }

    #[tracing::instrument(skip(self, request))]
    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let session: SessionObject = self
            .post_form("/checkout/sessions", &session_params(&request))
            .await?;

        let url = session.url.ok_or(GatewayError::MissingRedirectUrl)?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    #[test]
    fn coupon_params_use_minor_units_and_once_duration() {
        let params = coupon_params(Money::from_major(3));

        assert!(params.contains(&("amount_off".to_string(), "300".to_string())));
        assert!(params.contains(&("currency".to_string(), "inr".to_string())));
        assert!(params.contains(&("duration".to_string(), "once".to_string())));
    }

    #[test]
    fn session_params_encode_each_line_item() {
        let request = CheckoutRequest {
            line_items: vec![
                LineItem::new("Pizza", Money::from_minor(1000), 2),
                LineItem::new("Delivery Charges", Money::from_minor(500), 1),
            ],
            coupon: "CPN-1".to_string(),
            success_url: "http://localhost:3000/verify?success=true&orderId=abc".to_string(),
            cancel_url: "http://localhost:3000/verify?success=false&orderId=abc".to_string(),
        };

        let params = session_params(&request);

        assert!(params.contains(&(
            "line_items[0][price_data][product_data][name]".to_string(),
            "Pizza".to_string()
        )));
        assert!(params.contains(&(
            "line_items[0][price_data][unit_amount]".to_string(),
            "1000".to_string()
        )));
        assert!(params.contains(&("line_items[0][quantity]".to_string(), "2".to_string())));
        assert!(params.contains(&(
            "line_items[1][price_data][unit_amount]".to_string(),
            "500".to_string()
        )));
        assert!(params.contains(&("line_items[1][quantity]".to_string(), "1".to_string())));
        assert!(params.contains(&("mode".to_string(), "payment".to_string())));
        assert!(params.contains(&("discounts[0][coupon]".to_string(), "CPN-1".to_string())));
        assert!(params.contains(&(
            "success_url".to_string(),
            "http://localhost:3000/verify?success=true&orderId=abc".to_string()
        )));
    }
}
