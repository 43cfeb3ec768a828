//! # EZPIN Vendor Client
//!
//! Implementation of the EZPIN vendor API: token acquisition, catalog
//! listing and order creation. Calls are stateless; no token is cached.

use crate::config::EzpinConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use topup_core::{
    AccessToken, CatalogItem, OrderRequest, OrderResult, RelayError, RelayResult, VendorClient,
};
use tracing::{debug, error, info, instrument};

/// EZPIN API client
pub struct EzpinClient {
    config: EzpinConfig,
    client: Client,
}

impl EzpinClient {
    /// Create a new client with the transport's default settings
    pub fn new(config: EzpinConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = EzpinConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &EzpinConfig {
        &self.config
    }

    /// Send a request and decode a 2xx JSON body.
    ///
    /// Non-2xx responses become `RelayError::Upstream` carrying the body.
    /// An empty 2xx body decodes as JSON `null`.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> RelayResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("EZPIN API error: status={}, body={}", status, body);
            return Err(RelayError::upstream(status.as_u16(), &body));
        }

        let body = match body.trim() {
            "" => "null",
            trimmed => trimmed,
        };

        serde_json::from_str(body).map_err(|e| {
            RelayError::Serialization(format!("Failed to parse EZPIN response: {}", e))
        })
    }
}

#[async_trait]
impl VendorClient for EzpinClient {
    #[instrument(skip(self), fields(client_id = self.config.client_id))]
    async fn authenticate(&self) -> RelayResult<AccessToken> {
        let url = self.config.endpoint("/auth/token/");
        let payload = TokenRequest {
            client_id: self.config.client_id,
            secret_key: &self.config.secret_key,
        };

        let response: Option<TokenResponse> =
            self.execute(self.client.post(&url).json(&payload)).await?;

        match response
            .and_then(|r| r.access)
            .filter(|token| !token.is_empty())
        {
            Some(access) => {
                debug!("Obtained EZPIN access token");
                Ok(AccessToken::new(access))
            }
            None => {
                error!("EZPIN auth response carried no access token");
                Err(RelayError::Auth("No access token returned.".to_string()))
            }
        }
    }

    #[instrument(skip(self, token))]
    async fn list_catalog(&self, token: &AccessToken) -> RelayResult<Vec<CatalogItem>> {
        let url = self.config.endpoint("/catalogs/");

        let body: CatalogResponse = self
            .execute(self.client.get(&url).header("Authorization", token.bearer()))
            .await?;

        let items = body.into_items();
        info!("Fetched EZPIN catalog: {} items", items.len());
        Ok(items)
    }

    #[instrument(skip(self, token, order), fields(sku = order.sku, reference_code = %order.reference_code))]
    async fn create_order(
        &self,
        token: &AccessToken,
        order: &OrderRequest,
    ) -> RelayResult<OrderResult> {
        let url = self.config.endpoint("/orders/");

        let result: Value = self
            .execute(
                self.client
                    .post(&url)
                    .header("Authorization", token.bearer())
                    .json(order),
            )
            .await?;

        info!("Created EZPIN order: reference_code={}", order.reference_code);
        Ok(result)
    }

    fn vendor_name(&self) -> &'static str {
        "ezpin"
    }
}

// =============================================================================
// EZPIN API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: u64,
    secret_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access: Option<String>,
}

/// Catalog listing, either a bare array or a paginated envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogResponse {
    Items(Vec<CatalogItem>),
    Page { results: Vec<CatalogItem> },
}

impl CatalogResponse {
    fn into_items(self) -> Vec<CatalogItem> {
        match self {
            CatalogResponse::Items(items) => items,
            CatalogResponse::Page { results } => results,
        }
    }
}
