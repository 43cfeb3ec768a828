//! # Routes
//!
//! Axum router configuration for the relay API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  / - Plain-text banner
/// - GET  /health - Health check
/// - GET  /api/test - Vendor connection check
/// - GET  /api/catalog - Curated catalog
/// - POST /api/order - Submit a vendor order
/// - POST /api/checkout - Create a checkout session
pub fn create_router(state: AppState) -> Router {
    // Browser storefronts call the relay directly
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/test", get(handlers::test_connection))
        .route("/catalog", get(handlers::list_catalog))
        .route("/order", post(handlers::create_order))
        .route("/checkout", post(handlers::create_checkout));

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
