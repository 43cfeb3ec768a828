//! # Purchase Input
//!
//! Request body shared by the order and checkout endpoints, and the
//! required-field check applied to both.

use crate::error::{RelayError, RelayResult};
use serde_json::{Map, Value};

/// Purchase body as sent by relay callers.
///
/// Fields are optional so that every missing one is reported at once
/// instead of failing on the first.
#[derive(Debug, Clone, Default)]
pub struct PurchaseInput {
    pub sku: Option<i64>,
    pub price: Option<f64>,
    pub destination: Option<String>,
    /// Only meaningful for vendor orders
    pub delivery_type: Option<i64>,
}

/// A purchase with all required fields present
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub sku: i64,
    pub price: f64,
    pub destination: String,
    pub delivery_type: Option<i64>,
}

impl PurchaseInput {
    /// Read the purchase fields out of a JSON body.
    ///
    /// Absent or `null` fields stay `None`, as does every field of a body
    /// that is not an object. A present field of the wrong type is
    /// `RelayError::InvalidField`.
    pub fn from_json(body: Value) -> RelayResult<Self> {
        let Value::Object(fields) = body else {
            return Ok(Self::default());
        };

        Ok(Self {
            sku: typed_field(&fields, "sku", "an integer", Value::as_i64)?,
            price: typed_field(&fields, "price", "a number", Value::as_f64)?,
            destination: typed_field(&fields, "destination", "a string", |v| {
                v.as_str().map(String::from)
            })?,
            delivery_type: typed_field(&fields, "delivery_type", "an integer", Value::as_i64)?,
        })
    }

    /// Check that `sku`, `price` and `destination` are present.
    ///
    /// A blank destination counts as missing.
    pub fn validate(self) -> RelayResult<Purchase> {
        let destination = self
            .destination
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        match (self.sku, self.price, destination) {
            (Some(sku), Some(price), Some(destination)) => Ok(Purchase {
                sku,
                price,
                destination,
                delivery_type: self.delivery_type,
            }),
            (sku, price, destination) => {
                let mut fields = Vec::new();
                if sku.is_none() {
                    fields.push("sku");
                }
                if price.is_none() {
                    fields.push("price");
                }
                if destination.is_none() {
                    fields.push("destination");
                }
                Err(RelayError::Validation { fields })
            }
        }
    }
}

fn typed_field<T>(
    fields: &Map<String, Value>,
    field: &'static str,
    expected: &'static str,
    extract: impl Fn(&Value) -> Option<T>,
) -> RelayResult<Option<T>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => extract(value)
            .map(Some)
            .ok_or(RelayError::InvalidField { field, expected }),
    }
}
