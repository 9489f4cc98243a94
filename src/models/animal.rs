//! Animals boarded at the kennel.

use serde::{Deserialize, Serialize};

use super::{Customer, Location};

/// An animal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    /// Store-assigned identifier.
    pub id: i64,
    /// Name the animal answers to.
    pub name: String,
    /// Species, when known.
    pub species: Option<String>,
    /// Breed.
    pub breed: String,
    /// Free-text status, e.g. "Admitted".
    pub status: String,
    /// Location the animal is kept at.
    pub location_id: i64,
    /// Owning customer.
    pub customer_id: i64,
    /// Caretaker, when assigned.
    pub employee_id: Option<i64>,
}

/// Body of an animal create or update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnimal {
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    pub breed: String,
    pub status: String,
    #[serde(alias = "location_id")]
    pub location_id: i64,
    #[serde(alias = "customer_id")]
    pub customer_id: i64,
    #[serde(default, alias = "employee_id")]
    pub employee_id: Option<i64>,
}

impl NewAnimal {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Animal {
        Animal {
            id,
            name: self.name,
            species: self.species,
            breed: self.breed,
            status: self.status,
            location_id: self.location_id,
            customer_id: self.customer_id,
            employee_id: self.employee_id,
        }
    }
}

/// An animal with its location and owner embedded, as listed by `GET /animals`.
///
/// Relations are omitted when the referenced row does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalWithRelations {
    #[serde(flatten)]
    pub animal: Animal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn optional_fields_default_to_none() {
        let input: NewAnimal = serde_json::from_value(json!({
            "name": "Rex",
            "status": "Admitted",
            "breed": "Lab",
            "locationId": 1,
            "customerId": 1
        }))
        .unwrap();

        assert_eq!(input.species, None);
        assert_eq!(input.employee_id, None);
    }

    #[test]
    fn accepts_snake_case_foreign_keys() {
        let input: NewAnimal = serde_json::from_value(json!({
            "name": "Blue",
            "status": "Admitted",
            "breed": "Russian Blue",
            "location_id": 2,
            "customer_id": 1,
            "employee_id": 4
        }))
        .unwrap();

        assert_eq!(input.location_id, 2);
        assert_eq!(input.customer_id, 1);
        assert_eq!(input.employee_id, Some(4));
    }

    #[test]
    fn missing_breed_is_rejected() {
        let result = serde_json::from_value::<NewAnimal>(json!({
            "name": "Rex",
            "status": "Admitted",
            "locationId": 1,
            "customerId": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn relations_are_flattened_and_skipped_when_missing() {
        let listed = AnimalWithRelations {
            animal: Animal {
                id: 1,
                name: "Snickers".to_string(),
                species: None,
                breed: "Chihuahua".to_string(),
                status: "Admitted".to_string(),
                location_id: 1,
                customer_id: 9,
                employee_id: None,
            },
            location: Some(Location {
                id: 1,
                name: "Nashville North".to_string(),
                address: "64 Washington Heights".to_string(),
            }),
            customer: None,
        };

        assert_eq!(
            serde_json::to_value(listed).unwrap(),
            json!({
                "id": 1,
                "name": "Snickers",
                "species": null,
                "breed": "Chihuahua",
                "status": "Admitted",
                "locationId": 1,
                "customerId": 9,
                "employeeId": null,
                "location": {
                    "id": 1,
                    "name": "Nashville North",
                    "address": "64 Washington Heights"
                }
            })
        );
    }
}
