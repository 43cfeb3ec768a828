//! # Upstream Client Traits
//!
//! The relay talks to two upstreams: the top-up vendor and the payment
//! provider. Each is reached through a trait so handlers stay independent
//! of the concrete HTTP client.
//!
//! ```text
//! ┌──────────────────────────┐     ┌──────────────────────────┐
//! │   VendorClient (trait)   │     │  PaymentStrategy (trait) │
//! │  ├── authenticate()      │     │  └── create_checkout_    │
//! │  ├── list_catalog()      │     │      session()           │
//! │  └── create_order()      │     │                          │
//! └────────────▲─────────────┘     └────────────▲─────────────┘
//!              │                                │
//!      ┌───────┴───────┐                ┌───────┴───────┐
//!      │  EzpinClient  │                │StripeCheckout │
//!      └───────────────┘                │   Strategy    │
//!                                       └───────────────┘
//! ```

use crate::catalog::CatalogItem;
use crate::checkout::{CheckoutRequest, CheckoutSession};
use crate::error::RelayResult;
use crate::order::OrderRequest;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Vendor bearer token.
///
/// Obtained per request and never stored. `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Authorization header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Vendor's order-creation response, passed through untouched
pub type OrderResult = Value;

/// Client for the top-up vendor API.
///
/// Every call is independent: callers authenticate first and hand the
/// token to the one call that needs it.
#[async_trait]
pub trait VendorClient: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn authenticate(&self) -> RelayResult<AccessToken>;

    /// Fetch the full vendor catalog.
    async fn list_catalog(&self, token: &AccessToken) -> RelayResult<Vec<CatalogItem>>;

    /// Submit an order.
    async fn create_order(
        &self,
        token: &AccessToken,
        order: &OrderRequest,
    ) -> RelayResult<OrderResult>;

    /// Vendor name (for logging).
    fn vendor_name(&self) -> &'static str;
}

/// Client for the payment provider.
#[async_trait]
pub trait PaymentStrategy: Send + Sync {
    /// Create a hosted checkout session for a single-unit purchase.
    async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> RelayResult<CheckoutSession>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Shared vendor client (dynamic dispatch)
pub type BoxedVendorClient = Arc<dyn VendorClient>;

/// Shared payment strategy (dynamic dispatch)
pub type BoxedPaymentStrategy = Arc<dyn PaymentStrategy>;
