//! HTTP router assembly.

use axum::Router;
use tower_http::trace::TraceLayer;

use super::handlers::{handle, AppState};

/// Create the HTTP router: every path and method goes to [`handle`].
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
