//! # Relay Error Types
//!
//! Typed error handling for the top-up relay.
//! All upstream operations return `Result<T, RelayError>`.

use serde_json::Value;
use thiserror::Error;

/// Core error type for all relay operations
#[derive(Debug, Error)]
pub enum RelayError {
    /// Required request fields are missing
    #[error("Missing required fields: {}", fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    /// A request field is present with the wrong JSON type
    #[error("Invalid field {field}: expected {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// Vendor auth endpoint answered without an access token
    #[error("{0}")]
    Auth(String),

    /// Vendor endpoint answered with a non-success status
    #[error("Vendor request failed with status {status}")]
    Upstream {
        status: u16,
        /// Raw upstream error body, when the vendor sent one
        body: Option<Value>,
    },

    /// Payment provider rejected the checkout session
    #[error("{0}")]
    Payment(String),

    /// Network/HTTP error communicating with an upstream
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream response could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RelayError {
    /// Build an upstream error from a status code and the raw response text.
    ///
    /// JSON bodies are kept as parsed values, other non-empty bodies as strings.
    pub fn upstream(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let body = if trimmed.is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(trimmed)
                    .unwrap_or_else(|_| Value::String(trimmed.to_string())),
            )
        };
        RelayError::Upstream { status, body }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation { .. } | RelayError::InvalidField { .. } => 400,
            RelayError::Auth(_)
            | RelayError::Upstream { .. }
            | RelayError::Payment(_)
            | RelayError::Network(_)
            | RelayError::Configuration(_)
            | RelayError::Serialization(_) => 500,
        }
    }

    /// Payload reported to the caller in the `error` field.
    ///
    /// The raw upstream body wins when present, otherwise the display message.
    pub fn error_payload(&self) -> Value {
        match self {
            RelayError::Upstream {
                body: Some(body), ..
            } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
