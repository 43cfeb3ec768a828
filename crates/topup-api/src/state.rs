//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the upstream clients, configuration, and curated SKU list.

use std::net::SocketAddr;
use std::sync::Arc;
use topup_core::{BoxedPaymentStrategy, BoxedVendorClient, SkuAllowList};
use topup_ezpin::EzpinClient;
use topup_stripe::StripeCheckoutStrategy;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Explicit path of the curated catalog file
    pub catalog_config: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            catalog_config: std::env::var("CATALOG_CONFIG").ok(),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
            environment: "development".to_string(),
            catalog_config: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Top-up vendor client
    pub vendor: BoxedVendorClient,
    /// Payment provider client
    pub payments: BoxedPaymentStrategy,
    /// SKUs exposed by the catalog endpoint
    pub curated: Arc<SkuAllowList>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the EZPIN and Stripe clients
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let curated = load_sku_allow_list(config.catalog_config.as_deref())?;

        let vendor = EzpinClient::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize EZPIN: {}", e))?;
        let payments = StripeCheckoutStrategy::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        tracing::info!("EZPIN endpoint: {}", vendor.config().api_base_url);
        tracing::info!(
            "Stripe mode: {}, currency: {}",
            if payments.config().is_test_mode() { "test" } else { "live" },
            payments.config().currency
        );

        Ok(Self::from_parts(
            config,
            Arc::new(vendor),
            Arc::new(payments),
            curated,
        ))
    }

    /// Assemble state from already-built parts
    pub fn from_parts(
        config: AppConfig,
        vendor: BoxedVendorClient,
        payments: BoxedPaymentStrategy,
        curated: SkuAllowList,
    ) -> Self {
        Self {
            vendor,
            payments,
            curated: Arc::new(curated),
            config,
        }
    }
}

/// Load the curated SKU list from config file
fn load_sku_allow_list(explicit_path: Option<&str>) -> anyhow::Result<SkuAllowList> {
    if let Some(path) = explicit_path {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path, e))?;
        return parse_allow_list(path, &content);
    }

    let config_paths = [
        "config/catalog.toml",
        "../config/catalog.toml",
        "../../config/catalog.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            return parse_allow_list(path, &content);
        }
    }

    tracing::warn!("No catalog config found, using built-in curated SKUs");
    Ok(SkuAllowList::default())
}

fn parse_allow_list(path: &str, content: &str) -> anyhow::Result<SkuAllowList> {
    let list = SkuAllowList::from_toml(content)
        .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
    tracing::info!("Loaded {} curated SKUs from {}", list.curated_skus.len(), path);
    Ok(list)
}
