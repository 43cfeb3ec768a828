//! # topup-core
//!
//! Core types and traits for the EZPIN top-up relay.
//!
//! This crate provides:
//! - `VendorClient` and `PaymentStrategy` traits for the two upstreams
//! - `CatalogItem` and `SkuAllowList` for catalog curation
//! - `OrderRequest` and `PurchaseInput` for order submission
//! - `CheckoutRequest` and `CheckoutSession` for the checkout flow
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use topup_core::{OrderRequest, VendorClient};
//!
//! // Fresh token for this request only
//! let token = vendor.authenticate().await?;
//!
//! let order = OrderRequest::new(1148, 9.99, "+15555550123");
//! let result = vendor.create_order(&token, &order).await?;
//! ```

pub mod catalog;
pub mod checkout;
pub mod client;
pub mod error;
pub mod input;
pub mod order;

// Re-exports for convenience
pub use catalog::{CatalogItem, SkuAllowList, DEFAULT_CURATED_SKUS};
pub use checkout::{CheckoutRequest, CheckoutSession, Currency};
pub use client::{
    AccessToken, BoxedPaymentStrategy, BoxedVendorClient, OrderResult, PaymentStrategy,
    VendorClient,
};
pub use error::{RelayError, RelayResult};
pub use input::{Purchase, PurchaseInput};
pub use order::{generate_reference_code, OrderRequest, DEFAULT_DELIVERY_TYPE};
