//! # EZPIN Configuration
//!
//! Vendor credentials and endpoint, loaded from environment variables.

use std::env;
use topup_core::RelayError;

/// Default vendor API base URL
pub const DEFAULT_EZPIN_BASE_URL: &str = "https://api.ezpaypin.com/vendors/v2";

/// EZPIN API configuration
#[derive(Clone)]
pub struct EzpinConfig {
    /// Numeric client identifier
    pub client_id: u64,

    /// Secret key paired with the client identifier
    pub secret_key: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl EzpinConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `EZPIN_CLIENT_ID` (numeric)
    /// - `EZPIN_SECRET_KEY`
    ///
    /// Optional: `EZPIN_BASE_URL`
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();

        let client_id = env::var("EZPIN_CLIENT_ID")
            .map_err(|_| RelayError::Configuration("EZPIN_CLIENT_ID not set".to_string()))?;
        let client_id = client_id.trim().parse::<u64>().map_err(|_| {
            RelayError::Configuration("EZPIN_CLIENT_ID must be numeric".to_string())
        })?;

        let secret_key = env::var("EZPIN_SECRET_KEY")
            .map_err(|_| RelayError::Configuration("EZPIN_SECRET_KEY not set".to_string()))?;

        if secret_key.trim().is_empty() {
            return Err(RelayError::Configuration(
                "EZPIN_SECRET_KEY must not be empty".to_string(),
            ));
        }

        let api_base_url =
            env::var("EZPIN_BASE_URL").unwrap_or_else(|_| DEFAULT_EZPIN_BASE_URL.to_string());

        Ok(Self::new(client_id, secret_key).with_api_base_url(api_base_url))
    }

    /// Create config with explicit values (for testing)
    pub fn new(client_id: u64, secret_key: impl Into<String>) -> Self {
        Self {
            client_id,
            secret_key: secret_key.into(),
            api_base_url: DEFAULT_EZPIN_BASE_URL.to_string(),
        }
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL of an endpoint path such as `/auth/token/`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

impl std::fmt::Debug for EzpinConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EzpinConfig")
            .field("client_id", &self.client_id)
            .field("secret_key", &"***")
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
