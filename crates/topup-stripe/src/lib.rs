//! # topup-stripe
//!
//! Stripe payment strategy for ezpin-relay-rs.
//!
//! **StripeCheckoutStrategy** creates hosted Checkout Sessions with a single
//! unit-quantity line item priced in minor currency units.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use topup_stripe::StripeCheckoutStrategy;
//! use topup_core::{CheckoutRequest, PaymentStrategy};
//!
//! let strategy = StripeCheckoutStrategy::from_env()?;
//!
//! let session = strategy
//!     .create_checkout_session(&CheckoutRequest::new(1148, 19.99, "+15555550123"))
//!     .await?;
//!
//! // Redirect user to session.url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutStrategy;
pub use config::StripeConfig;
