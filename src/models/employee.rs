//! Kennel employees.

use serde::{Deserialize, Serialize};

/// An employee working at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Store-assigned identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Location the employee works at.
    pub location_id: i64,
}

/// Body of an employee create or update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    #[serde(alias = "location_id")]
    pub location_id: i64,
}

impl NewEmployee {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Employee {
        Employee {
            id,
            name: self.name,
            location_id: self.location_id,
        }
    }
}
