pub mod error;
pub mod memory;
pub mod stripe;
pub mod types;

pub use error::{GatewayError, Result};
pub use memory::{CreatedCoupon, CreatedSession, InMemoryGateway};
pub use stripe::StripeGateway;
pub use types::{CheckoutRequest, CheckoutSession, Coupon, LineItem, PaymentGateway};
