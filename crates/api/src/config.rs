//! Application configuration loaded from environment variables.

use axum::http::Uri;
use thiserror::Error;

/// Configuration problems that make the process refuse to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The callback base URL is not an absolute http/https URL.
    #[error("Invalid base URL `{0}`: must be an absolute http:// or https:// URL")]
    InvalidBaseUrl(String),

    /// The payment gateway credential is missing.
    #[error("STRIPE_SECRET_KEY is not set")]
    MissingGatewaySecret,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `URL` — public base URL the payment gateway redirects back to
///   (default: `"http://localhost:3000"`; startup fails if malformed)
/// - `STRIPE_SECRET_KEY` — payment gateway credential (required)
/// - `DATABASE_URL` — optional; selects the PostgreSQL store when set
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub base_url: String,
    pub gateway_secret: String,
    pub database_url: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Fails on a malformed base URL or a missing gateway credential;
    /// everything else falls back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        let base_url = validate_base_url(base_url)?;

        let gateway_secret =
            std::env::var("STRIPE_SECRET_KEY").map_err(|_| ConfigError::MissingGatewaySecret)?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            base_url,
            gateway_secret,
            database_url: std::env::var("DATABASE_URL").ok(),
        })
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Checks that the callback base is an absolute http/https URL.
fn validate_base_url(raw: String) -> Result<String, ConfigError> {
    let uri: Uri = match raw.parse() {
        Ok(uri) => uri,
        Err(_) => return Err(ConfigError::InvalidBaseUrl(raw)),
    };

    match uri.scheme_str() {
        Some("http") | Some("https") if uri.authority().is_some() => Ok(raw),
        _ => Err(ConfigError::InvalidBaseUrl(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_bases() {
        assert!(validate_base_url("http://localhost:3000".to_string()).is_ok());
        assert!(validate_base_url("https://orders.example.com".to_string()).is_ok());
        assert!(validate_base_url("https://orders.example.com/shop".to_string()).is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_relative_urls() {
        assert!(validate_base_url("ftp://example.com".to_string()).is_err());
        assert!(validate_base_url("localhost:3000".to_string()).is_err());
        assert!(validate_base_url("/just/a/path".to_string()).is_err());
        assert!(validate_base_url("not a url".to_string()).is_err());
    }

    #[test]
    fn addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            log_level: "debug".to_string(),
            base_url: "http://localhost:3000".to_string(),
            gateway_secret: "sk_test_123".to_string(),
            database_url: None,
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }
}
