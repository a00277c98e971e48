pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod store;

pub use common::{Money, OrderId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use order::{Cart, Order, OrderItem, DEFAULT_STATUS};
pub use postgres::PostgresStore;
pub use store::{OrderFilter, OrderPatch, OrderStore, UserStore};
