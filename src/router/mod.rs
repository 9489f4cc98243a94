//! Resource router.
//!
//! Maps a request URL onto a resource collection and an identifier or filter,
//! then dispatches through per-verb handler tables into the store.
//!
//! ```text
//! GET /animals/3            -> ("animals", Item(3))        -> get-single
//! GET /animals?status=Sick  -> ("animals", Query{status})  -> by-status
//! PUT /customers/2 {...}    -> ("customers", Item(2))      -> update
//! ```

pub mod dispatch;
pub mod parse;

use strum::{Display, EnumIter, EnumString};

pub use dispatch::{Outcome, ResourceRouter};
pub use parse::{parse_query, parse_url, ParsedUrl, QueryParams, Target};

/// One of the four entity collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Animals,
    Locations,
    Customers,
    Employees,
}

/// HTTP verbs the router has tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    /// Whether requests with this verb carry a JSON body.
    pub fn has_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put)
    }
}
