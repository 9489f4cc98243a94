//! Typed kennel records.
//!
//! Each entity has a stored record type (with its store-assigned `id`) and an
//! input type used for create and full-record update bodies. JSON field names
//! are camelCase; inputs also accept the snake_case spellings older clients
//! send (`location_id`, `customer_id`, `employee_id`).

pub mod animal;
pub mod customer;
pub mod employee;
pub mod location;

pub use animal::{Animal, AnimalWithRelations, NewAnimal};
pub use customer::{Customer, NewCustomer};
pub use employee::{Employee, NewEmployee};
pub use location::{Location, NewLocation};
