//! # Request Handlers
//!
//! Axum request handlers for the relay API.
//! Each handler authenticates against the vendor on its own; tokens are
//! never shared between requests.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use topup_core::{
    CatalogItem, CheckoutRequest, OrderRequest, Purchase, PurchaseInput, RelayError, RelayResult,
    DEFAULT_DELIVERY_TYPE,
};
use tracing::{debug, error, info, instrument, Span};

/// Plain-text banner served at `/`
pub const BANNER: &str = "✅ EZPIN backend is live! Visit /api/test to verify connection.";

/// Connection check success message
pub const CONNECTION_OK: &str = "🎉 EZPIN Sandbox connection successful!";

/// Connection check failure message
pub const CONNECTION_FAILED: &str = "❌ Connection failed";

// =============================================================================
// Request/Response Types
// =============================================================================

/// Connection check response
#[derive(Debug, Serialize)]
pub struct TestConnectionResponse {
    pub message: String,
    pub total_products: usize,
    pub sample_product: Option<CatalogItem>,
}

/// Create order response
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub reference_code: String,
    /// Vendor's order-creation response
    pub data: Value,
}

/// Create checkout response
#[derive(Debug, Serialize)]
pub struct CreateCheckoutResponse {
    /// Checkout URL (redirect user here)
    pub url: String,
}

/// Error response
///
/// Validation failures carry only `error`; upstream failures add `message`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: Value,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn relay_error_to_response(message: &str, err: RelayError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let response = match &err {
        RelayError::Validation { .. } | RelayError::InvalidField { .. } => ErrorResponse {
            message: None,
            error: Value::String(err.to_string()),
        },
        _ => ErrorResponse {
            message: Some(message.to_string()),
            error: err.error_payload(),
        },
    };

    (status, Json(response))
}

/// Read and validate a purchase body.
///
/// A body that cannot be read as JSON at all (no body, wrong content type,
/// malformed JSON) is treated as one with every required field missing.
fn parse_purchase(body: Result<Json<Value>, JsonRejection>) -> RelayResult<Purchase> {
    let input = match body {
        Ok(Json(value)) => PurchaseInput::from_json(value)?,
        Err(rejection) => {
            debug!("Unreadable purchase body: {}", rejection);
            PurchaseInput::default()
        }
    };

    let purchase = input.validate()?;
    Span::current().record("sku", purchase.sku);
    Ok(purchase)
}

// =============================================================================
// Handlers
// =============================================================================

/// Static banner
pub async fn index() -> &'static str {
    BANNER
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ezpin-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Vendor connection check: authenticate, then list the catalog
#[instrument(skip(state))]
pub async fn test_connection(
    State(state): State<AppState>,
) -> Result<Json<TestConnectionResponse>, ApiError> {
    const FAILURE: &str = CONNECTION_FAILED;

    let token = state.vendor.authenticate().await.map_err(|e| {
        error!("Vendor authentication failed: {}", e);
        relay_error_to_response(FAILURE, e)
    })?;

    let catalog = state.vendor.list_catalog(&token).await.map_err(|e| {
        error!("Catalog fetch failed: {}", e);
        relay_error_to_response(FAILURE, e)
    })?;

    info!("Vendor connection OK: {} products", catalog.len());

    Ok(Json(TestConnectionResponse {
        message: CONNECTION_OK.to_string(),
        total_products: catalog.len(),
        sample_product: catalog.into_iter().next(),
    }))
}

/// Curated catalog
#[instrument(skip(state))]
pub async fn list_catalog(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    const FAILURE: &str = "Failed to fetch catalog";

    let token = state.vendor.authenticate().await.map_err(|e| {
        error!("Vendor authentication failed: {}", e);
        relay_error_to_response(FAILURE, e)
    })?;

    let catalog = state.vendor.list_catalog(&token).await.map_err(|e| {
        error!("Catalog fetch failed: {}", e);
        relay_error_to_response(FAILURE, e)
    })?;

    let total = catalog.len();
    let curated = state.curated.filter(catalog);
    info!("Serving {} of {} catalog items", curated.len(), total);

    Ok(Json(curated))
}

/// Submit a vendor order
#[instrument(skip(state, body), fields(sku = tracing::field::Empty))]
pub async fn create_order(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    const FAILURE: &str = "Order creation failed";

    let purchase = parse_purchase(body).map_err(|e| relay_error_to_response(FAILURE, e))?;

    let token = state.vendor.authenticate().await.map_err(|e| {
        error!("Vendor authentication failed: {}", e);
        relay_error_to_response(FAILURE, e)
    })?;

    let order = OrderRequest::new(purchase.sku, purchase.price, purchase.destination)
        .with_delivery_type(purchase.delivery_type.unwrap_or(DEFAULT_DELIVERY_TYPE));

    info!(
        "Submitting order: sku={}, reference_code={}",
        order.sku, order.reference_code
    );

    let data = state.vendor.create_order(&token, &order).await.map_err(|e| {
        error!("Order {} failed: {}", order.reference_code, e);
        relay_error_to_response(FAILURE, e)
    })?;

    Ok(Json(CreateOrderResponse {
        message: "Order created successfully".to_string(),
        reference_code: order.reference_code,
        data,
    }))
}

/// Create a hosted checkout session
#[instrument(skip(state, body), fields(sku = tracing::field::Empty))]
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<CreateCheckoutResponse>, ApiError> {
    const FAILURE: &str = "Checkout session creation failed";

    let purchase = parse_purchase(body).map_err(|e| relay_error_to_response(FAILURE, e))?;

    let request = CheckoutRequest::new(purchase.sku, purchase.price, purchase.destination);

    let session = state
        .payments
        .create_checkout_session(&request)
        .await
        .map_err(|e| {
            error!("Failed to create checkout: {}", e);
            relay_error_to_response(FAILURE, e)
        })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CreateCheckoutResponse { url: session.url }))
}
