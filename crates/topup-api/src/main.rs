//! # EZPIN Relay
//!
//! HTTP relay in front of the EZPIN vendor API and Stripe Checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export EZPIN_CLIENT_ID=1234
//! export EZPIN_SECRET_KEY=...
//! export STRIPE_SECRET_KEY=sk_test_...
//!
//! # Run the server
//! ezpin-relay
//! ```

use topup_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Curated SKUs: {:?}", state.curated.curated_skus);
    info!(
        "Upstreams: vendor={}, payments={}",
        state.vendor.vendor_name(),
        state.payments.provider_name()
    );

    let app = routes::create_router(state);

    info!("Server running on http://{}", addr);

    if !is_prod {
        info!("Connection check: GET http://{}/api/test", addr);
        info!("Order: POST http://{}/api/order", addr);
        info!("Checkout: POST http://{}/api/checkout", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
