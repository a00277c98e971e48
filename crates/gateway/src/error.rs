use thiserror::Error;

/// Errors that can occur when talking to the payment gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never made it to the gateway or the response could not
    /// be read.
    #[error("Payment gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("Payment gateway rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The gateway created a session but returned no redirect URL.
    #[error("Payment gateway returned no redirect URL")]
    MissingRedirectUrl,
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
