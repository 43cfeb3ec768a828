//! # Checkout Types
//!
//! Payment checkout types for the relay.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Convert a decimal amount to minor units (price × 100).
    ///
    /// Rounds to the nearest unit so that 19.99 becomes 1999, not 1998.
    pub fn to_minor_units(&self, amount: f64) -> i64 {
        (amount * 100.0).round() as i64
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "cad" => Ok(Currency::CAD),
            "aud" => Ok(Currency::AUD),
            other => Err(format!("Unsupported currency: {}", other)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A single-unit purchase to be paid through the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub sku: i64,
    /// Decimal price in major units
    pub price: f64,
    pub destination: String,
}

impl CheckoutRequest {
    pub fn new(sku: i64, price: f64, destination: impl Into<String>) -> Self {
        Self {
            sku,
            price,
            destination: destination.into(),
        }
    }

    /// Line-item name shown on the hosted checkout page
    pub fn display_name(&self) -> String {
        format!("Top-up SKU {}", self.sku)
    }
}

/// A checkout session returned by the payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider session ID
    pub session_id: String,

    /// Hosted checkout URL (redirect user here)
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
