//! Order lifecycle service.
//!
//! Mediates between the order/user store and the payment gateway: placing
//! an order persists the record, empties the owner's cart, and opens a
//! hosted checkout session; the gateway's callback later confirms or
//! discards the order.

use common::{Money, OrderId, UserId};
use gateway::{CheckoutRequest, CheckoutSession, LineItem, PaymentGateway};
use store::{Cart, Order, OrderFilter, OrderItem, OrderPatch, OrderStore, UserStore};

use crate::error::Result;

/// Name of the synthetic checkout line that bills the delivery fee.
const DELIVERY_LINE_NAME: &str = "Delivery Charges";

/// Input to [`OrderService::place_order`].
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    /// The user placing the order.
    pub user_id: UserId,

    /// Ordered line items.
    pub items: Vec<OrderItem>,

    /// Caller-supplied order total.
    pub amount: Money,

    /// Opaque shipping address payload.
    pub address: serde_json::Value,

    /// Discount applied through the gateway coupon.
    pub discount: Money,

    /// Delivery charge.
    pub delivery: Money,
}

/// Outcome of a payment verification callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Payment confirmed; the order is kept and marked paid.
    Confirmed,
    /// Payment failed; the order record was discarded.
    Discarded,
}

/// Service for managing the order lifecycle.
///
/// Holds its collaborators and the callback base URL by value; everything
/// is injected at construction, there is no ambient configuration.
pub struct OrderService<S, G> {
    store: S,
    gateway: G,
    base_url: String,
}

impl<S, G> OrderService<S, G>
where
    S: OrderStore + UserStore,
    G: PaymentGateway,
{
    /// Creates a new order service.
    ///
    /// `base_url` is the externally reachable root the payment gateway
    /// redirects back to; it must already be validated as an absolute
    /// http/https URL.
    pub fn new(store: S, gateway: G, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            store,
            gateway,
            base_url,
        }
    }

    /// Places a new order and opens a checkout session for it.
    ///
    /// The order record and the cart clearing are not rolled back when a
    /// later gateway call fails; the order then stays behind unpaid with
    /// no session attached.
    #[tracing::instrument(skip(self, cmd), fields(user_id = %cmd.user_id))]
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<CheckoutSession> {
        metrics::counter!("orders_placed_total").increment(1);
        let start = std::time::Instant::now();

        let PlaceOrder {
            user_id,
            items,
            amount,
            address,
            discount,
            delivery,
        } = cmd;

        let order = Order::new(user_id, items, amount, address, discount, delivery);
        let order_id = order.id;
        let line_items = checkout_lines(&order);

        self.store.insert(order).await?;
        self.store.set_cart(user_id, Cart::new()).await?;

        let coupon = self.gateway.create_coupon(discount).await?;

        let session = self
            .gateway
            .create_checkout_session(CheckoutRequest {
                line_items,
                coupon: coupon.id,
                success_url: self.callback_url(order_id, true),
                cancel_url: self.callback_url(order_id, false),
            })
            .await?;

        tracing::info!(%order_id, session_id = %session.id, "checkout session created");
        metrics::histogram!("checkout_session_seconds").record(start.elapsed().as_secs_f64());

        Ok(session)
    }

    /// Applies the gateway's payment callback to an order.
    ///
    /// A successful callback marks the order paid; repeating it is a
    /// no-op. A failed callback deletes the record; an id that is already
    /// gone is treated as deleted.
    #[tracing::instrument(skip(self))]
    pub async fn verify_order(&self, order_id: OrderId, success: bool) -> Result<Verification> {
        if success {
            self.store
                .update(order_id, OrderPatch::payment(true))
                .await?;
            metrics::counter!("orders_paid_total").increment(1);
            Ok(Verification::Confirmed)
        } else {
            self.store.delete(order_id).await?;
            metrics::counter!("orders_discarded_total").increment(1);
            Ok(Verification::Discarded)
        }
    }

    /// Returns all orders placed by a user, in store-native order.
    #[tracing::instrument(skip(self))]
    pub async fn user_orders(&self, user_id: UserId) -> Result<Vec<Order>> {
        Ok(self.store.find(OrderFilter::for_user(user_id)).await?)
    }

    /// Returns every order in the store.
    #[tracing::instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        Ok(self.store.find(OrderFilter::all()).await?)
    }

    /// Overwrites an order's status text.
    ///
    /// Any string is accepted; an unknown id is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(&self, order_id: OrderId, status: String) -> Result<()> {
        self.store.update(order_id, OrderPatch::status(status)).await?;
        Ok(())
    }

    fn callback_url(&self, order_id: OrderId, success: bool) -> String {
        format!(
            "{}/verify?success={}&orderId={}",
            self.base_url, success, order_id
        )
    }
}

/// Builds the checkout lines for an order: one per item plus the synthetic
/// delivery charge, all in minor units.
fn checkout_lines(order: &Order) -> Vec<LineItem> {
    let mut lines: Vec<LineItem> = order
        .items
        .iter()
        .map(|item| LineItem::new(item.name.clone(), item.price, item.quantity))
        .collect();

    lines.push(LineItem::new(DELIVERY_LINE_NAME, order.delivery, 1));

    lines
}
