//! # Order Types
//!
//! Vendor order submission types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Delivery type used when the caller does not pick one
pub const DEFAULT_DELIVERY_TYPE: i64 = 1;

fn default_delivery_type() -> i64 {
    DEFAULT_DELIVERY_TYPE
}

/// An order as submitted to the vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub sku: i64,
    /// Always 1
    pub quantity: u32,
    pub price: f64,
    /// Always false
    pub pre_order: bool,
    #[serde(default = "default_delivery_type")]
    pub delivery_type: i64,
    /// Recipient (phone number or email)
    pub destination: String,
    /// Client-generated unique reference
    pub reference_code: String,
}

impl OrderRequest {
    /// Create a single-unit order with a fresh reference code
    pub fn new(sku: i64, price: f64, destination: impl Into<String>) -> Self {
        Self {
            sku,
            quantity: 1,
            price,
            pre_order: false,
            delivery_type: DEFAULT_DELIVERY_TYPE,
            destination: destination.into(),
            reference_code: generate_reference_code(),
        }
    }

    /// Builder: set delivery type
    pub fn with_delivery_type(mut self, delivery_type: i64) -> Self {
        self.delivery_type = delivery_type;
        self
    }
}

/// Generate a globally unique order reference code (UUID v4)
pub fn generate_reference_code() -> String {
    Uuid::new_v4().to_string()
}
