//! In-memory payment gateway for testing.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Money;

use crate::{
    error::{GatewayError, Result},
    types::{CheckoutRequest, CheckoutSession, Coupon, PaymentGateway},
};

/// A coupon registered with the in-memory gateway.
#[derive(Debug, Clone)]
pub struct CreatedCoupon {
    pub id: String,
    pub amount_off: Money,
}

/// A checkout session opened against the in-memory gateway.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    pub id: String,
    pub url: String,
    pub request: CheckoutRequest,
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    coupons: Vec<CreatedCoupon>,
    sessions: Vec<CreatedSession>,
    next_id: u32,
    fail_on_coupon: bool,
    fail_on_session: bool,
}

/// In-memory payment gateway for testing.
///
/// Records every coupon and session it is asked to create so tests can
/// inspect what would have been sent to the real gateway.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryGateway {
    /// Creates a new in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the gateway to fail coupon creation.
    pub fn set_fail_on_coupon(&self, fail: bool) {
        self.state.write().unwrap().fail_on_coupon = fail;
    }

    /// Configures the gateway to fail session creation.
    pub fn set_fail_on_session(&self, fail: bool) {
        self.state.write().unwrap().fail_on_session = fail;
    }

    /// Returns the number of coupons created.
    pub fn coupon_count(&self) -> usize {
        self.state.read().unwrap().coupons.len()
    }

    /// Returns the number of sessions created.
    pub fn session_count(&self) -> usize {
        self.state.read().unwrap().sessions.len()
    }

    /// Returns the most recently created coupon, if any.
    pub fn last_coupon(&self) -> Option<CreatedCoupon> {
        self.state.read().unwrap().coupons.last().cloned()
    }

    /// Returns the most recently created session, if any.
    pub fn last_session(&self) -> Option<CreatedSession> {
        self.state.read().unwrap().sessions.last().cloned()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryGateway {
    async fn create_coupon(&self, amount_off: Money) -> Result<Coupon> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_coupon {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "Invalid coupon amount".to_string(),
            });
        }

        state.next_id += 1;
        let id = format!("CPN-{:04}", state.next_id);
        state.coupons.push(CreatedCoupon {
            id: id.clone(),
            amount_off,
        });

        Ok(Coupon { id })
    }

    async fn create_checkout_session(&self, request: CheckoutRequest) -> Result<CheckoutSession> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_session {
            return Err(GatewayError::Rejected {
                status: 400,
                message: "Session refused".to_string(),
            });
        }

        state.next_id += 1;
        let id = format!("cs_test_{:04}", state.next_id);
        let url = format!("https://checkout.test/pay/{id}");
        state.sessions.push(CreatedSession {
            id: id.clone(),
            url: url.clone(),
            request,
        });

        Ok(CheckoutSession { id, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;

    fn sample_request(coupon: &str) -> CheckoutRequest {
        CheckoutRequest {
            line_items: vec![LineItem::new("Pizza", Money::from_minor(1000), 2)],
            coupon: coupon.to_string(),
            success_url: "http://localhost:3000/verify?success=true&orderId=x".to_string(),
            cancel_url: "http://localhost:3000/verify?success=false&orderId=x".to_string(),
        }
    }

    #[tokio::test]
    async fn records_coupons_and_sessions() {
        let gateway = InMemoryGateway::new();

        let coupon = gateway.create_coupon(Money::from_minor(300)).await.unwrap();
        assert!(coupon.id.starts_with("CPN-"));
        assert_eq!(gateway.coupon_count(), 1);
        assert_eq!(
            gateway.last_coupon().unwrap().amount_off,
            Money::from_minor(300)
        );

        let session = gateway
            .create_checkout_session(sample_request(&coupon.id))
            .await
            .unwrap();
        assert!(session.url.contains(&session.id));
        assert_eq!(gateway.session_count(), 1);
        assert_eq!(gateway.last_session().unwrap().request.coupon, coupon.id);
    }

    #[tokio::test]
    async fn fail_on_coupon() {
        let gateway = InMemoryGateway::new();
        gateway.set_fail_on_coupon(true);

        let result = gateway.create_coupon(Money::from_minor(300)).await;
        assert!(matches!(result, Err(GatewayError::Rejected { .. })));
        assert_eq!(gateway.coupon_count(), 0);
    }

    #[tokio::test]
    async fn fail_on_session() {
        let gateway = InMemoryGateway::new();
        gateway.set_fail_on_session(true);

        let result = gateway.create_checkout_session(sample_request("CPN-1")).await;
        assert!(matches!(result, Err(GatewayError::Rejected { .. })));
        assert_eq!(gateway.session_count(), 0);
    }

    #[tokio::test]
    async fn sequential_ids() {
        let gateway = InMemoryGateway::new();

        let c1 = gateway.create_coupon(Money::from_minor(100)).await.unwrap();
        let c2 = gateway.create_coupon(Money::from_minor(200)).await.unwrap();

        assert_eq!(c1.id, "CPN-0001");
        assert_eq!(c2.id, "CPN-0002");
    }
}
