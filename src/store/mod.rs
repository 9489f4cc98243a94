//! Data access layer over SQLite.
//!
//! This module handles:
//! - Connection pooling and schema creation
//! - One table module per entity (list, get, filter, create, update, delete)
//! - Password hashing for customer records
//! - Sample data for a fresh database
//!
//! Every operation is a single statement on a pooled connection; the
//! connection goes back to the pool on every path, including errors.

pub mod animals;
pub mod customers;
pub mod employees;
pub mod locations;
pub mod password;
pub mod seed;

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::StoreError;

pub use animals::Animals;
pub use customers::Customers;
pub use employees::Employees;
pub use locations::Locations;

const SCHEMA: [&str; 4] = [
    r#"CREATE TABLE IF NOT EXISTS Location (
        id      INTEGER PRIMARY KEY AUTOINCREMENT,
        name    TEXT NOT NULL,
        address TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Customer (
        id       INTEGER PRIMARY KEY AUTOINCREMENT,
        name     TEXT NOT NULL,
        email    TEXT NOT NULL,
        address  TEXT NOT NULL,
        password TEXT NOT NULL
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Employee (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        location_id INTEGER NOT NULL REFERENCES Location(id)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS Animal (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT NOT NULL,
        species     TEXT,
        breed       TEXT NOT NULL,
        status      TEXT NOT NULL,
        location_id INTEGER NOT NULL REFERENCES Location(id),
        customer_id INTEGER NOT NULL REFERENCES Customer(id),
        employee_id INTEGER REFERENCES Employee(id)
    )"#,
];

/// Handle to the kennel database.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open a pool against the configured database, creating the file if needed.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        // Foreign keys stay advisory: SQLite leaves enforcement off unless asked.
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect_with(options)
            .await?;

        info!(
            url = %config.database_url,
            max_connections = config.db_max_connections,
            "Store connected"
        );

        Ok(Self { pool })
    }

    /// Open a private in-memory database with the schema applied.
    ///
    /// The pool holds exactly one connection that never expires, since each
    /// SQLite in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create any missing tables. Safe to run on every start.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        debug!("Schema ensured");
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Uniform CRUD surface implemented by every entity table.
///
/// The router's verb tables are built from these operations; entity-specific
/// filters live as inherent functions on the implementing types.
pub trait Table: Send + Sync + 'static {
    /// Record returned to clients.
    type Record: Serialize + Send + 'static;
    /// Body accepted by create and update.
    type Input: DeserializeOwned + Send + 'static;

    /// Every record in the table.
    fn all(store: &Store) -> impl Future<Output = Result<Vec<Self::Record>, StoreError>> + Send;

    /// One record by id, `None` if it does not exist.
    fn get(
        store: &Store,
        id: i64,
    ) -> impl Future<Output = Result<Option<Self::Record>, StoreError>> + Send;

    /// Insert a record and return it with its new id.
    fn create(
        store: &Store,
        input: Self::Input,
    ) -> impl Future<Output = Result<Self::Record, StoreError>> + Send;

    /// Replace every field of record `id`. Returns false if no row matched.
    fn update(
        store: &Store,
        id: i64,
        input: Self::Input,
    ) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Remove record `id`, returning the number of rows deleted (0 or 1).
    fn delete(store: &Store, id: i64) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

/// Count failed statements before handing the error back.
pub(crate) fn observe<T>(result: Result<T, sqlx::Error>) -> Result<T, StoreError> {
    result.map_err(|e| {
        crate::metrics::inc_store_errors();
        StoreError::from(e)
    })
}
