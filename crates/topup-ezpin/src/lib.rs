//! # topup-ezpin
//!
//! EZPIN vendor client for ezpin-relay-rs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use topup_ezpin::EzpinClient;
//! use topup_core::VendorClient;
//!
//! let vendor = EzpinClient::from_env()?;
//!
//! let token = vendor.authenticate().await?;
//! let catalog = vendor.list_catalog(&token).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::EzpinClient;
pub use config::{EzpinConfig, DEFAULT_EZPIN_BASE_URL};
