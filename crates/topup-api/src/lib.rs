//! # topup-api
//!
//! HTTP API layer for ezpin-relay-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Banner |
//! | GET | `/health` | Health check |
//! | GET | `/api/test` | Vendor connection check |
//! | GET | `/api/catalog` | Curated vendor catalog |
//! | POST | `/api/order` | Submit a vendor order |
//! | POST | `/api/checkout` | Create checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
