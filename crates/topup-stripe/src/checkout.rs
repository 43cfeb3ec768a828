//! # Stripe Checkout Sessions
//!
//! Implementation of Stripe Checkout Sessions API.
//! Every session carries one unit-quantity line item.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use topup_core::{CheckoutRequest, CheckoutSession, PaymentStrategy, RelayError, RelayResult};
use tracing::{debug, error, info, instrument};

/// Stripe Checkout Session strategy
///
/// Uses Stripe's hosted checkout page for payments.
pub struct StripeCheckoutStrategy {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutStrategy {
    /// Create a new Stripe checkout strategy
    pub fn new(config: StripeConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| RelayError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Build form data for the Stripe API
    fn build_form_params(&self, request: &CheckoutRequest) -> Vec<(String, String)> {
        let currency = self.config.currency;

        vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), self.config.success_url.clone()),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".to_string(),
                currency.as_str().to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                currency.to_minor_units(request.price).to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.display_name(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("metadata[sku]".to_string(), request.sku.to_string()),
            ("metadata[destination]".to_string(), request.destination.clone()),
        ]
    }
}

#[async_trait]
impl PaymentStrategy for StripeCheckoutStrategy {
    #[instrument(skip(self, request), fields(sku = request.sku))]
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> RelayResult<CheckoutSession> {
        let form_params = self.build_form_params(request);

        debug!(
            "Creating Stripe checkout session: sku={}, price={}",
            request.sku, request.price
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(RelayError::Payment(error_response.error.message));
            }

            return Err(RelayError::Payment(format!("HTTP {}: {}", status, body)));
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                RelayError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, session_response.url
        );

        Ok(CheckoutSession {
            session_id: session_response.id,
            url: session_response.url,
            expires_at: session_response
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}
