pub mod types;

pub use types::{Money, OrderId, UserId};
