//! Catch-all request handler: body decoding, dispatch, status mapping, CORS.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::metrics;
use crate::router::{parse_url, Outcome, ResourceRouter, Verb};
use crate::store::Store;

/// Methods advertised in preflight responses.
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE";
/// Request headers advertised in preflight responses.
pub const ALLOWED_HEADERS: &str = "X-Requested-With, Content-Type, Accept";

/// Body text for 500 responses.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Application state shared with the handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Kennel database.
    pub store: Store,
    /// Verb tables.
    pub router: Arc<ResourceRouter>,
}

impl AppState {
    /// Create state with the full kennel router.
    pub fn new(store: Store) -> Self {
        Self {
            store,
            router: Arc::new(ResourceRouter::new()),
        }
    }
}

/// Serve one request.
pub async fn handle(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let url = parse_url(uri.path(), uri.query());

    let response = if method == Method::OPTIONS {
        preflight()
    } else if let Ok(verb) = Verb::from_str(method.as_str()) {
        match serve(&state, verb, &url, &body).await {
            Ok(response) => response,
            Err(err) => error_response(err),
        }
    } else {
        warn!(%method, path = uri.path(), "Unsupported method");
        json_response(
            StatusCode::NOT_IMPLEMENTED,
            Some(json!({ "error": format!("unsupported method {method}") })),
        )
    };

    debug!(%method, path = uri.path(), status = response.status().as_u16(), "Request served");
    metrics::record_request(
        start,
        method.as_str(),
        &url.resource,
        response.status().as_u16(),
    );
    response
}

async fn serve(
    state: &AppState,
    verb: Verb,
    url: &crate::router::ParsedUrl,
    body: &Bytes,
) -> Result<Response, ApiError> {
    let body = if verb.has_body() { decode_body(body)? } else { None };
    let outcome = state.router.dispatch(&state.store, verb, url, body).await?;

    let response = match (verb, outcome) {
        (_, Outcome::Found(value)) => json_response(StatusCode::OK, Some(value)),
        (_, Outcome::Created(value)) => json_response(StatusCode::CREATED, Some(value)),
        (_, Outcome::NotFound) => json_response(StatusCode::NOT_FOUND, Some(Outcome::empty_body())),
        (_, Outcome::Updated(true)) => json_response(StatusCode::NO_CONTENT, None),
        (_, Outcome::Updated(false)) => json_response(StatusCode::NOT_FOUND, None),
        (_, Outcome::Deleted(_)) => json_response(StatusCode::NO_CONTENT, None),
        (Verb::Post, Outcome::Unmatched) => {
            json_response(StatusCode::CREATED, Some(Outcome::empty_body()))
        }
        (_, Outcome::Unmatched) => json_response(StatusCode::OK, Some(Outcome::empty_body())),
    };

    Ok(response)
}

/// Parse a request body as JSON. An empty body yields `None`.
fn decode_body(body: &Bytes) -> Result<Option<Value>, ApiError> {
    if body.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}

/// Build a response with the standard JSON and CORS headers.
pub fn json_response(status: StatusCode, body: Option<Value>) -> Response {
    let body = body.map(|value| value.to_string()).unwrap_or_default();
    (
        status,
        [
            (header::CONTENT_TYPE, "application/json"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
        .into_response()
}

/// CORS preflight answer; identical for every path.
pub fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Map a failure to its response. Server-side detail is logged, never sent.
fn error_response(err: ApiError) -> Response {
    let (status, message) = match &err {
        ApiError::MalformedInput(_) => {
            warn!(error = %err, "Rejected request");
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        ApiError::Store(_) | ApiError::Internal(_) => {
            error!(error = %err, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
        }
    };
    json_response(status, Some(json!({ "error": message })))
}
