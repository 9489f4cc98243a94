//! Kennel customers.
//!
//! The password only ever travels inbound: it is hashed before it reaches the
//! store and no response type carries it.

use serde::{Deserialize, Serialize};

/// A customer as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    /// Store-assigned identifier.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Contact email, also usable as a filter.
    pub email: String,
    /// Postal address.
    pub address: String,
}

/// Body of a customer create or update.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub address: String,
    /// Plaintext password, hashed by the store before insert.
    pub password: String,
}

impl NewCustomer {
    /// Attach a store-assigned id, dropping the password.
    pub fn with_id(self, id: i64) -> Customer {
        Customer {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
        }
    }
}

impl std::fmt::Debug for NewCustomer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewCustomer")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("address", &self.address)
            .field("password", &"<redacted>")
            .finish()
    }
}
