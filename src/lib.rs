//! Kennel CRUD server.
//!
//! Serves animals, locations, customers and employees from SQLite over a
//! small JSON HTTP API. Requests are routed by a hand-rolled resource router
//! rather than a framework route table:
//!
//! ```text
//! request ──► api::handle ──► router::parse_url ──► ResourceRouter::dispatch
//!                                                        │ verb table
//!                                                        ▼
//!            JSON response ◄── status mapping ◄── store::{Animals, ...}
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`models`]: Typed entity records
//! - [`store`]: SQLite data access layer
//! - [`router`]: URL parsing and per-verb dispatch tables
//! - [`api`]: HTTP endpoint
//! - [`metrics`]: Request and store metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod router;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{KennelError, Result};
