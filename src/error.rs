//! Unified error types for the kennel server.

use thiserror::Error;

/// Unified error type for the kennel server.
#[derive(Error, Debug)]
pub enum KennelError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Store error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Data access layer errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection or SQL failure reported by the driver.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Password could not be hashed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Errors surfaced at the HTTP endpoint boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body is empty, not JSON, or not shaped like the resource.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The store failed while serving the request.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A response could not be produced.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedInput(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Store(StoreError::Sqlx(err))
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, KennelError>;
