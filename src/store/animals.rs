//! Animal table.

use tracing::debug;

use super::{observe, Store, Table};
use crate::error::StoreError;
use crate::metrics::timer_store_query;
use crate::models::{Animal, AnimalWithRelations, Customer, Location, NewAnimal};

const SELECT_ANIMAL: &str = "SELECT a.id, a.name, a.species, a.breed, a.status, \
     a.location_id, a.customer_id, a.employee_id FROM Animal a";

/// The `Animal` table.
#[derive(Debug, Clone, Copy)]
pub struct Animals;

/// Animal row joined with its location and owner.
#[derive(Debug, sqlx::FromRow)]
struct AnimalRelationsRow {
    #[sqlx(flatten)]
    animal: Animal,
    location_name: Option<String>,
    location_address: Option<String>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    customer_address: Option<String>,
}

impl From<AnimalRelationsRow> for AnimalWithRelations {
    fn from(row: AnimalRelationsRow) -> Self {
        let location = match (row.location_name, row.location_address) {
            (Some(name), Some(address)) => Some(Location {
                id: row.animal.location_id,
                name,
                address,
            }),
            _ => None,
        };

        let customer = match (row.customer_name, row.customer_email, row.customer_address) {
            (Some(name), Some(email), Some(address)) => Some(Customer {
                id: row.animal.customer_id,
                name,
                email,
                address,
            }),
            _ => None,
        };

        Self {
            animal: row.animal,
            location,
            customer,
        }
    }
}

impl Animals {
    /// Every animal with its location and owner embedded.
    ///
    /// Dangling references leave the relation empty instead of hiding the animal.
    pub async fn all_with_relations(store: &Store) -> Result<Vec<AnimalWithRelations>, StoreError> {
        let _timer = timer_store_query("animals.all_with_relations");
        let rows = observe(
            sqlx::query_as::<_, AnimalRelationsRow>(
                "SELECT a.id, a.name, a.species, a.breed, a.status, \
                        a.location_id, a.customer_id, a.employee_id, \
                        l.name location_name, l.address location_address, \
                        c.name customer_name, c.email customer_email, c.address customer_address \
                 FROM Animal a \
                 LEFT JOIN Location l ON l.id = a.location_id \
                 LEFT JOIN Customer c ON c.id = a.customer_id \
                 ORDER BY a.id",
            )
            .fetch_all(store.pool())
            .await,
        )?;

        Ok(rows.into_iter().map(AnimalWithRelations::from).collect())
    }

    /// Animals kept at `location_id`.
    pub async fn by_location(store: &Store, location_id: i64) -> Result<Vec<Animal>, StoreError> {
        let _timer = timer_store_query("animals.by_location");
        observe(
            sqlx::query_as::<_, Animal>(&format!(
                "{SELECT_ANIMAL} WHERE a.location_id = ? ORDER BY a.id"
            ))
            .bind(location_id)
            .fetch_all(store.pool())
            .await,
        )
    }

    /// Animals whose status equals `status` exactly.
    pub async fn by_status(store: &Store, status: &str) -> Result<Vec<Animal>, StoreError> {
        let _timer = timer_store_query("animals.by_status");
        observe(
            sqlx::query_as::<_, Animal>(&format!("{SELECT_ANIMAL} WHERE a.status = ? ORDER BY a.id"))
                .bind(status)
                .fetch_all(store.pool())
                .await,
        )
    }
}

impl Table for Animals {
    type Record = Animal;
    type Input = NewAnimal;

    async fn all(store: &Store) -> Result<Vec<Animal>, StoreError> {
        let _timer = timer_store_query("animals.all");
        observe(
            sqlx::query_as::<_, Animal>(&format!("{SELECT_ANIMAL} ORDER BY a.id"))
                .fetch_all(store.pool())
                .await,
        )
    }

    async fn get(store: &Store, id: i64) -> Result<Option<Animal>, StoreError> {
        let _timer = timer_store_query("animals.get");
        observe(
            sqlx::query_as::<_, Animal>(&format!("{SELECT_ANIMAL} WHERE a.id = ?"))
                .bind(id)
                .fetch_optional(store.pool())
                .await,
        )
    }

    async fn create(store: &Store, input: NewAnimal) -> Result<Animal, StoreError> {
        let _timer = timer_store_query("animals.create");
        let result = observe(
            sqlx::query(
                "INSERT INTO Animal \
                 (name, species, breed, status, location_id, customer_id, employee_id) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(&input.status)
            .bind(input.location_id)
            .bind(input.customer_id)
            .bind(input.employee_id)
            .execute(store.pool())
            .await,
        )?;

        let id = result.last_insert_rowid();
        debug!(id, "Animal created");
        Ok(input.with_id(id))
    }

    async fn update(store: &Store, id: i64, input: NewAnimal) -> Result<bool, StoreError> {
        let _timer = timer_store_query("animals.update");
        let result = observe(
            sqlx::query(
                "UPDATE Animal SET \
                 name = ?, species = ?, breed = ?, status = ?, \
                 location_id = ?, customer_id = ?, employee_id = ? \
                 WHERE id = ?",
            )
            .bind(&input.name)
            .bind(&input.species)
            .bind(&input.breed)
            .bind(&input.status)
            .bind(input.location_id)
            .bind(input.customer_id)
            .bind(input.employee_id)
            .bind(id)
            .execute(store.pool())
            .await,
        )?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(store: &Store, id: i64) -> Result<u64, StoreError> {
        let _timer = timer_store_query("animals.delete");
        let result = observe(
            sqlx::query("DELETE FROM Animal WHERE id = ?")
                .bind(id)
                .execute(store.pool())
                .await,
        )?;
        Ok(result.rows_affected())
    }
}
