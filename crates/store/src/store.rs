use async_trait::async_trait;
use common::{OrderId, UserId};

use crate::{Cart, Order, Result};

/// Filter for order queries.
///
/// An empty filter matches every order.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict to orders owned by this user.
    pub user_id: Option<UserId>,
}

impl OrderFilter {
    /// Creates a filter matching all orders.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a filter matching a single user's orders.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Returns true if the order passes the filter.
    pub fn matches(&self, order: &Order) -> bool {
        match self.user_id {
            Some(user_id) => order.user_id == user_id,
            None => true,
        }
    }
}

/// Partial update applied to a stored order.
///
/// Unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    /// New payment flag.
    pub payment: Option<bool>,
    /// New status text.
    pub status: Option<String>,
}

impl OrderPatch {
    /// Creates a patch setting only the payment flag.
    pub fn payment(value: bool) -> Self {
        Self {
            payment: Some(value),
            ..Self::default()
        }
    }

    /// Creates a patch setting only the status text.
    pub fn status(value: impl Into<String>) -> Self {
        Self {
            status: Some(value.into()),
            ..Self::default()
        }
    }

    /// Applies the patch to an order record in place.
    pub fn apply(&self, order: &mut Order) {
        if let Some(payment) = self.payment {
            order.payment = payment;
        }
        if let Some(ref status) = self.status {
            order.status = status.clone();
        }
    }
}

/// Core trait for order persistence.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order record.
    async fn insert(&self, order: Order) -> Result<()>;

    /// Loads an order by ID.
    ///
    /// Returns None if no such order exists.
    async fn get(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns all orders matching the filter, in store-native order.
    async fn find(&self, filter: OrderFilter) -> Result<Vec<Order>>;

    /// Applies a partial update to an order.
    ///
    /// Returns false if the order does not exist; this is not an error.
    async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<bool>;

    /// Deletes an order.
    ///
    /// Returns false if the order was already gone; this is not an error.
    async fn delete(&self, id: OrderId) -> Result<bool>;
}

/// Trait for the slice of user persistence this backend touches.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Replaces a user's cart contents wholesale.
    async fn set_cart(&self, user_id: UserId, cart: Cart) -> Result<()>;

    /// Reads a user's cart. Users without a stored cart have an empty one.
    async fn get_cart(&self, user_id: UserId) -> Result<Cart>;
}
