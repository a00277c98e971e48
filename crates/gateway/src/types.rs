//! Checkout types and the payment gateway trait.

use async_trait::async_trait;
use common::Money;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A single line on a hosted checkout page.
///
/// Amounts are in minor currency units, which is what the gateway expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name shown on the checkout page.
    pub name: String,

    /// Price per unit, in minor units.
    pub unit_amount: Money,

    /// Quantity purchased.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a new checkout line item.
    pub fn new(name: impl Into<String>, unit_amount: Money, quantity: u32) -> Self {
        Self {
            name: name.into(),
            unit_amount,
            quantity,
        }
    }
}

/// A one-time discount code registered with the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Gateway-assigned coupon identifier.
    pub id: String,
}

/// Everything needed to open a hosted checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Checkout lines, including any synthetic charges.
    pub line_items: Vec<LineItem>,

    /// Coupon id applied to the session.
    pub coupon: String,

    /// Where the gateway redirects the purchaser after paying.
    pub success_url: String,

    /// Where the gateway redirects the purchaser after cancelling.
    pub cancel_url: String,
}

/// A hosted checkout session created by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Gateway-assigned session identifier.
    pub id: String,

    /// Redirect URL for the purchaser.
    pub url: String,
}

/// Trait for payment gateway operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Registers a one-time discount code for the given amount.
    async fn create_coupon(&self, amount_off: Money) -> Result<Coupon>;

    /// Opens a hosted checkout session and returns its redirect URL.
    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession>;
}
