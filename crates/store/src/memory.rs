use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, UserId};
use tokio::sync::RwLock;

use crate::{
    Cart, Order, Result,
    store::{OrderFilter, OrderPatch, OrderStore, UserStore},
};

/// In-memory store implementation.
///
/// Keeps orders in insertion order and provides the same interface as the
/// PostgreSQL implementation. Used for tests and for running the server
/// without a database.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    orders: Arc<RwLock<Vec<Order>>>,
    carts: Arc<RwLock<HashMap<UserId, Cart>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all orders and carts.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
        self.carts.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert(&self, order: Order) -> Result<()> {
        self.orders.write().await.push(order);
        Ok(())
    }

    async fn get(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find(&self, filter: OrderFilter) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().filter(|o| filter.matches(o)).cloned().collect())
    }

    async fn update(&self, id: OrderId, patch: OrderPatch) -> Result<bool> {
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|o| o.id == id) {
            Some(order) => {
                patch.apply(order);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: OrderId) -> Result<bool> {
        let mut orders = self.orders.write().await;
        let before = orders.len();
        orders.retain(|o| o.id != id);
        Ok(orders.len() < before)
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn set_cart(&self, user_id: UserId, cart: Cart) -> Result<()> {
        self.carts.write().await.insert(user_id, cart);
        Ok(())
    }

    async fn get_cart(&self, user_id: UserId) -> Result<Cart> {
        let carts = self.carts.read().await;
        Ok(carts.get(&user_id).cloned().unwrap_or_default())
    }
}
