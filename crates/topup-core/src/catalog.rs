//! # Catalog Types
//!
//! Vendor catalog records and the curated SKU allow-list.
//! The allow-list is loaded from `config/catalog.toml`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// SKUs curated by default when no catalog config is present
pub const DEFAULT_CURATED_SKUS: [i64; 3] = [1148, 1201, 1320];

/// A vendor catalog record.
///
/// Only `sku` is interpreted; every other field passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stock-keeping unit identifier
    pub sku: i64,

    /// Pricing and product metadata, as sent by the vendor
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CatalogItem {
    /// Create an item with no extra metadata
    pub fn new(sku: i64) -> Self {
        Self {
            sku,
            details: Map::new(),
        }
    }

    /// Builder: attach a metadata field
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Curated SKU allow-list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuAllowList {
    pub curated_skus: Vec<i64>,
}

impl SkuAllowList {
    /// Create an allow-list from explicit SKUs
    pub fn new(skus: impl IntoIterator<Item = i64>) -> Self {
        Self {
            curated_skus: skus.into_iter().collect(),
        }
    }

    /// Check if a SKU is curated
    pub fn allows(&self, sku: i64) -> bool {
        self.curated_skus.contains(&sku)
    }

    /// Keep curated items, preserving vendor order
    pub fn filter(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        items.into_iter().filter(|item| self.allows(item.sku)).collect()
    }

    /// Load allow-list from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

impl Default for SkuAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_CURATED_SKUS)
    }
}
