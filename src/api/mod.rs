//! HTTP endpoint.
//!
//! Every request lands on one catch-all handler that delegates to the
//! resource router; no framework route table is involved.

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
