//! Location table.

use tracing::debug;

use super::{observe, Store, Table};
use crate::error::StoreError;
use crate::metrics::timer_store_query;
use crate::models::{Location, NewLocation};

/// The `Location` table.
#[derive(Debug, Clone, Copy)]
pub struct Locations;

impl Table for Locations {
    type Record = Location;
    type Input = NewLocation;

    async fn all(store: &Store) -> Result<Vec<Location>, StoreError> {
        let _timer = timer_store_query("locations.all");
        observe(
            sqlx::query_as::<_, Location>("SELECT id, name, address FROM Location ORDER BY id")
                .fetch_all(store.pool())
                .await,
        )
    }

    async fn get(store: &Store, id: i64) -> Result<Option<Location>, StoreError> {
        let _timer = timer_store_query("locations.get");
        observe(
            sqlx::query_as::<_, Location>("SELECT id, name, address FROM Location WHERE id = ?")
                .bind(id)
                .fetch_optional(store.pool())
                .await,
        )
    }

    async fn create(store: &Store, input: NewLocation) -> Result<Location, StoreError> {
        let _timer = timer_store_query("locations.create");
        let result = observe(
            sqlx::query("INSERT INTO Location (name, address) VALUES (?, ?)")
                .bind(&input.name)
                .bind(&input.address)
                .execute(store.pool())
                .await,
        )?;

        let id = result.last_insert_rowid();
        debug!(id, "Location created");
        Ok(input.with_id(id))
    }

    async fn update(store: &Store, id: i64, input: NewLocation) -> Result<bool, StoreError> {
        let _timer = timer_store_query("locations.update");
        let result = observe(
            sqlx::query("UPDATE Location SET name = ?, address = ? WHERE id = ?")
                .bind(&input.name)
                .bind(&input.address)
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(store: &Store, id: i64) -> Result<u64, StoreError> {
        let _timer = timer_store_query("locations.delete");
        let result = observe(
            sqlx::query("DELETE FROM Location WHERE id = ?")
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected())
    }
}
