pub mod error;
pub mod service;

pub use error::{OrderError, Result};
pub use service::{OrderService, PlaceOrder, Verification};
