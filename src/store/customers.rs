//! Customer table.

use tracing::debug;

use super::password::hash_password;
use super::{observe, Store, Table};
use crate::error::StoreError;
use crate::metrics::timer_store_query;
use crate::models::{Customer, NewCustomer};

const SELECT_CUSTOMER: &str = "SELECT id, name, email, address FROM Customer";

/// The `Customer` table.
#[derive(Debug, Clone, Copy)]
pub struct Customers;

impl Customers {
    /// Customers whose email equals `email` exactly.
    pub async fn by_email(store: &Store, email: &str) -> Result<Vec<Customer>, StoreError> {
        let _timer = timer_store_query("customers.by_email");
        observe(
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE email = ? ORDER BY id"))
                .bind(email)
                .fetch_all(store.pool())
                .await,
        )
    }

    /// Stored password hash for customer `id`.
    #[cfg(test)]
    pub async fn password_hash(store: &Store, id: i64) -> Result<Option<String>, StoreError> {
        let row: Option<(String,)> = observe(
            sqlx::query_as("SELECT password FROM Customer WHERE id = ?")
                .bind(id)
                .fetch_optional(store.pool())
                .await,
        )?;
        Ok(row.map(|(hash,)| hash))
    }
}

impl Table for Customers {
    type Record = Customer;
    type Input = NewCustomer;

    async fn all(store: &Store) -> Result<Vec<Customer>, StoreError> {
        let _timer = timer_store_query("customers.all");
        observe(
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} ORDER BY id"))
                .fetch_all(store.pool())
                .await,
        )
    }

    async fn get(store: &Store, id: i64) -> Result<Option<Customer>, StoreError> {
        let _timer = timer_store_query("customers.get");
        observe(
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMER} WHERE id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await,
        )
    }

    async fn create(store: &Store, input: NewCustomer) -> Result<Customer, StoreError> {
        let hash = hash_password(&input.password).await?;

        let _timer = timer_store_query("customers.create");
        let result = observe(
            sqlx::query("INSERT INTO Customer (name, email, address, password) VALUES (?, ?, ?, ?)")
                .bind(&input.name)
                .bind(&input.email)
                .bind(&input.address)
                .bind(&hash)
                .execute(store.pool())
                .await,
        )?;

        let id = result.last_insert_rowid();
        debug!(id, "Customer created");
        Ok(input.with_id(id))
    }

    async fn update(store: &Store, id: i64, input: NewCustomer) -> Result<bool, StoreError> {
        let hash = hash_password(&input.password).await?;

        let _timer = timer_store_query("customers.update");
        let result = observe(
            sqlx::query(
                "UPDATE Customer SET name = ?, email = ?, address = ?, password = ? WHERE id = ?",
            )
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&hash)
            .bind(id)
            .execute(store.pool())
            .await,
        )?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(store: &Store, id: i64) -> Result<u64, StoreError> {
        let _timer = timer_store_query("customers.delete");
        let result = observe(
            sqlx::query("DELETE FROM Customer WHERE id = ?")
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected())
    }
}
