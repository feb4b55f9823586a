//! Error types for payment method adapters.
//!
//! Business outcomes (declined, cancelled, not captured) are not errors; they
//! come back as a [`NormalizedResponse`](crate::gateways::NormalizedResponse)
//! with `success == false`. [`GatewayError`] covers everything that prevents
//! a normalized response from being produced at all.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// A config key the driver needs is absent or empty.
    #[error("missing required config key: {0}")]
    MissingConfig(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Transport failure: connect, TLS, timeout, body read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a body that is not JSON.
    #[error("could not decode provider response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown payment driver: {0}")]
    UnknownDriver(String),
}

impl GatewayError {
    /// Stable machine-readable code used in HTTP error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingConfig(_) | Self::InvalidConfig(_) => "GATEWAY_MISCONFIGURED",
            Self::Http(e) if e.is_timeout() => "GATEWAY_TIMEOUT",
            Self::Http(_) => "GATEWAY_UNREACHABLE",
            Self::Decode { .. } => "GATEWAY_BAD_RESPONSE",
            Self::UnknownDriver(_) => "UNKNOWN_DRIVER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_display() {
        let err = GatewayError::MissingConfig("api_key".to_string());
        assert_eq!(err.to_string(), "missing required config key: api_key");
        assert_eq!(err.code(), "GATEWAY_MISCONFIGURED");
    }

    #[test]
    fn decode_error_carries_status() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = GatewayError::Decode { status: 502, source };
        assert!(err.to_string().contains("HTTP 502"));
        assert_eq!(err.code(), "GATEWAY_BAD_RESPONSE");
    }
}
