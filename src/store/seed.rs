//! Sample kennel data for a fresh database.

use tracing::info;

use super::{Animals, Customers, Employees, Locations, Store, Table};
use crate::error::StoreError;
use crate::models::{NewAnimal, NewCustomer, NewEmployee, NewLocation};

/// Load the sample locations, customers, employees and animals.
///
/// Does nothing if any location already exists. Returns whether data was loaded.
pub async fn seed_sample_data(store: &Store) -> Result<bool, StoreError> {
    if !Locations::all(store).await?.is_empty() {
        info!("Store already holds data, skipping seed");
        return Ok(false);
    }

    for (name, address) in [
        ("Nashville North", "64 Washington Heights"),
        ("Nashville South", "101 Penn Ave"),
    ] {
        Locations::create(
            store,
            NewLocation {
                name: name.to_string(),
                address: address.to_string(),
            },
        )
        .await?;
    }

    for (name, email, address) in [
        ("Mo Silvera", "mo@silvera.com", "201 Created St"),
        ("Bryan Nilsen", "bryan@nilsen.com", "500 Internal Error Blvd"),
        ("Jenna Solis", "jenna@solis.com", "301 Redirect Ave"),
        ("Emily Lemmon", "emily@lemmon.com", "454 Mulberry Way"),
    ] {
        Customers::create(
            store,
            NewCustomer {
                name: name.to_string(),
                email: email.to_string(),
                address: address.to_string(),
                password: "password".to_string(),
            },
        )
        .await?;
    }

    for (name, location_id) in [("Jeremy Bakker", 1), ("Hannah Hall", 1), ("Leah Hoefling", 2)] {
        Employees::create(
            store,
            NewEmployee {
                name: name.to_string(),
                location_id,
            },
        )
        .await?;
    }

    for (name, species, breed, location_id, customer_id) in [
        ("Snickers", "Dog", "Chihuahua", 1, 4),
        ("Roman", "Dog", "Dalmatian", 1, 2),
        ("Blue", "Cat", "Russian Blue", 2, 1),
        ("Eleanor", "Dog", "Italian Greyhound", 1, 2),
    ] {
        Animals::create(
            store,
            NewAnimal {
                name: name.to_string(),
                species: Some(species.to_string()),
                breed: breed.to_string(),
                status: "Admitted".to_string(),
                location_id,
                customer_id,
                employee_id: None,
            },
        )
        .await?;
    }

    info!("Sample data loaded");
    Ok(true)
}
