//! The persisted order record and its parts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{Money, OrderId, UserId};
use serde::{Deserialize, Serialize};

/// Status assigned to every freshly placed order.
pub const DEFAULT_STATUS: &str = "Food Processing";

/// A line item on an order as submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Human-readable item name.
    pub name: String,

    /// Price per unit.
    pub price: Money,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    pub fn new(name: impl Into<String>, price: Money, quantity: u32) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Returns the total price for this item (quantity * unit price).
    pub fn total_price(&self) -> Money {
        self.price.scale(self.quantity)
    }
}

/// Per-user cart contents, mapping item id to quantity.
///
/// Only ever replaced wholesale here; individual cart edits happen in a
/// different part of the system.
pub type Cart = HashMap<String, u32>;

/// A persisted record of a purchase request.
///
/// The `amount` is caller-supplied and deliberately not recomputed from the
/// items; the `address` payload is stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier, assigned at creation and never changed.
    pub id: OrderId,

    /// The user who placed the order.
    pub user_id: UserId,

    /// Ordered line items.
    pub items: Vec<OrderItem>,

    /// Caller-supplied order total.
    pub amount: Money,

    /// Opaque shipping address payload.
    pub address: serde_json::Value,

    /// Discount applied through the payment gateway.
    pub discount: Money,

    /// Delivery charge, billed as its own checkout line item.
    pub delivery: Money,

    /// True only after the payment callback confirmed success.
    pub payment: bool,

    /// Free-text fulfillment status.
    pub status: String,

    /// Creation timestamp.
    pub date: DateTime<Utc>,
}

impl Order {
    /// Creates a new unpaid order with a fresh identifier and the default
    /// status.
    pub fn new(
        user_id: UserId,
        items: Vec<OrderItem>,
        amount: Money,
        address: serde_json::Value,
        discount: Money,
        delivery: Money,
    ) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            items,
            amount,
            address,
            discount,
            delivery,
            payment: false,
            status: DEFAULT_STATUS.to_string(),
            date: Utc::now(),
        }
    }

    /// Sum of the item totals, before delivery and discount.
    pub fn items_total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, item| acc + item.total_price())
    }
}
