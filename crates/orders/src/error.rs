use gateway::GatewayError;
use store::StoreError;
use thiserror::Error;

/// Errors that can occur in the order lifecycle service.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Store error.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Payment gateway error.
    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Convenience type alias for order service results.
pub type Result<T> = std::result::Result<T, OrderError>;
