//! Kennel locations.

use serde::{Deserialize, Serialize};

/// A kennel location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Location {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: String,
}

/// Body of a location create or update.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
}

impl NewLocation {
    /// Attach a store-assigned id.
    pub fn with_id(self, id: i64) -> Location {
        Location {
            id,
            name: self.name,
            address: self.address,
        }
    }
}
