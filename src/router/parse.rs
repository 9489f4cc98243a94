//! URL parsing into resource and identifier-or-filter.

use std::collections::HashMap;
use std::str::FromStr;

use super::Resource;

/// Query parameters, first value per name.
pub type QueryParams = HashMap<String, String>;

/// What part of a collection the request addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The whole collection.
    Collection,
    /// One record by identifier.
    Item(i64),
    /// An all-digit identifier too large for any record id.
    OutOfRange,
    /// A filtered subset.
    Query(QueryParams),
}

/// A request URL split into resource name and target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    /// First path segment, verbatim (may name no known resource).
    pub resource: String,
    /// Identifier, filter, or whole collection.
    pub target: Target,
}

impl ParsedUrl {
    /// The known resource this URL names, if any.
    pub fn known_resource(&self) -> Option<Resource> {
        Resource::from_str(&self.resource).ok()
    }

    /// Identifier, when the URL addresses a single record.
    pub fn id(&self) -> Option<i64> {
        match self.target {
            Target::Item(id) => Some(id),
            _ => None,
        }
    }
}

/// Split a request path and optional query string.
///
/// A non-empty query string always wins over a trailing path segment. The
/// second path segment becomes the identifier if it parses as an integer; an
/// all-digit segment that overflows `i64` still addresses a single record,
/// one that cannot exist.
pub fn parse_url(path: &str, query: Option<&str>) -> ParsedUrl {
    let mut segments = path.split('/').skip(1);
    let resource = segments.next().unwrap_or_default().to_string();

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        return ParsedUrl {
            resource,
            target: Target::Query(parse_query(query)),
        };
    }

    let target = match segments.next() {
        Some(segment) => match segment.parse::<i64>() {
            Ok(id) => Target::Item(id),
            Err(_) if is_digits(segment) => Target::OutOfRange,
            Err(_) => Target::Collection,
        },
        None => Target::Collection,
    };

    ParsedUrl { resource, target }
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

/// Decode a form-urlencoded query string.
///
/// Parameters with empty values are dropped; for repeated names the first
/// value wins.
pub fn parse_query(query: &str) -> QueryParams {
    let mut params = QueryParams::new();
    for (name, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        params
            .entry(name.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}
