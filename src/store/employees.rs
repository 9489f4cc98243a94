//! Employee table.

use tracing::debug;

use super::{observe, Store, Table};
use crate::error::StoreError;
use crate::metrics::timer_store_query;
use crate::models::{Employee, NewEmployee};

const SELECT_EMPLOYEE: &str = "SELECT id, name, location_id FROM Employee";

/// The `Employee` table.
#[derive(Debug, Clone, Copy)]
pub struct Employees;

impl Employees {
    /// Employees working at `location_id`.
    pub async fn by_location(store: &Store, location_id: i64) -> Result<Vec<Employee>, StoreError> {
        let _timer = timer_store_query("employees.by_location");
        observe(
            sqlx::query_as::<_, Employee>(&format!(
                "{SELECT_EMPLOYEE} WHERE location_id = ? ORDER BY id"
            ))
            .bind(location_id)
            .fetch_all(store.pool())
            .await,
        )
    }
}

impl Table for Employees {
    type Record = Employee;
    type Input = NewEmployee;

    async fn all(store: &Store) -> Result<Vec<Employee>, StoreError> {
        let _timer = timer_store_query("employees.all");
        observe(
            sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} ORDER BY id"))
                .fetch_all(store.pool())
                .await,
        )
    }

    async fn get(store: &Store, id: i64) -> Result<Option<Employee>, StoreError> {
        let _timer = timer_store_query("employees.get");
        observe(
            sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} WHERE id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await,
        )
    }

    async fn create(store: &Store, input: NewEmployee) -> Result<Employee, StoreError> {
        let _timer = timer_store_query("employees.create");
        let result = observe(
            sqlx::query("INSERT INTO Employee (name, location_id) VALUES (?, ?)")
                .bind(&input.name)
                .bind(input.location_id)
                .execute(store.pool())
                .await,
        )?;

        let id = result.last_insert_rowid();
        debug!(id, "Employee created");
        Ok(input.with_id(id))
    }

    async fn update(store: &Store, id: i64, input: NewEmployee) -> Result<bool, StoreError> {
        let _timer = timer_store_query("employees.update");
        let result = observe(
            sqlx::query("UPDATE Employee SET name = ?, location_id = ? WHERE id = ?")
                .bind(&input.name)
                .bind(input.location_id)
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(store: &Store, id: i64) -> Result<u64, StoreError> {
        let _timer = timer_store_query("employees.delete");
        let result = observe(
            sqlx::query("DELETE FROM Employee WHERE id = ?")
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected())
    }
}
