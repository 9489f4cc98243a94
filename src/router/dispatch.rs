//! Verb tables and dispatch.
//!
//! Each HTTP verb owns a table from [`Resource`] to a handler into the store.
//! Handlers are plain function pointers returning boxed futures, so every
//! table is built once at startup and shared read-only across requests.

use std::collections::HashMap;

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::parse::{ParsedUrl, QueryParams, Target};
use super::{Resource, Verb};
use crate::error::ApiError;
use crate::store::{Animals, Customers, Employees, Locations, Store, Table};

type Reply<T> = BoxFuture<'static, Result<T, ApiError>>;

type ListFn = fn(Store) -> Reply<Value>;
type GetFn = fn(Store, i64) -> Reply<Option<Value>>;
type FilterFn = fn(Store, String) -> Reply<Value>;
type CreateFn = fn(Store, Value) -> Reply<Value>;
type UpdateFn = fn(Store, i64, Value) -> Reply<bool>;
type DeleteFn = fn(Store, i64) -> Reply<u64>;

/// Result of dispatching one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Records read by GET.
    Found(Value),
    /// Record created by POST, with its new id.
    Created(Value),
    /// GET for an identifier with no record.
    NotFound,
    /// PUT result: whether a record was replaced.
    Updated(bool),
    /// DELETE result: rows removed.
    Deleted(u64),
    /// No handler for this resource or filter; the caller answers with `{}`.
    Unmatched,
}

impl Outcome {
    /// The default body for requests nothing handled.
    pub fn empty_body() -> Value {
        Value::Object(Map::new())
    }
}

/// Per-verb handler tables keyed by resource.
#[derive(Debug, Clone)]
pub struct ResourceRouter {
    list: HashMap<Resource, ListFn>,
    get: HashMap<Resource, GetFn>,
    /// Filters in precedence order: the first one present in the query is used.
    filters: HashMap<Resource, Vec<(&'static str, FilterFn)>>,
    create: HashMap<Resource, CreateFn>,
    update: HashMap<Resource, UpdateFn>,
    delete: HashMap<Resource, DeleteFn>,
}

impl ResourceRouter {
    /// Router with every kennel resource and filter registered.
    pub fn new() -> Self {
        let mut router = Self::empty();

        router.register::<Animals>(Resource::Animals);
        router.register::<Locations>(Resource::Locations);
        router.register::<Customers>(Resource::Customers);
        router.register::<Employees>(Resource::Employees);

        router
            .list
            .insert(Resource::Animals, list_animals_with_relations);

        router.filters.insert(
            Resource::Animals,
            vec![
                ("status", animals_by_status as FilterFn),
                ("location_id", animals_by_location as FilterFn),
            ],
        );
        router
            .filters
            .insert(Resource::Employees, vec![("location_id", employees_by_location as FilterFn)]);
        router
            .filters
            .insert(Resource::Customers, vec![("email", customers_by_email as FilterFn)]);

        router
    }

    /// Router with no tables; every request is unmatched.
    pub fn empty() -> Self {
        Self {
            list: HashMap::new(),
            get: HashMap::new(),
            filters: HashMap::new(),
            create: HashMap::new(),
            update: HashMap::new(),
            delete: HashMap::new(),
        }
    }

    /// Register the uniform CRUD handlers of table `T` under `resource`.
    pub fn register<T: Table>(&mut self, resource: Resource) {
        self.list.insert(resource, list::<T>);
        self.get.insert(resource, get::<T>);
        self.create.insert(resource, create::<T>);
        self.update.insert(resource, update::<T>);
        self.delete.insert(resource, delete::<T>);
    }

    /// Route one request to its handler.
    ///
    /// POST and PUT require a body, checked before anything else. Unknown
    /// resources never touch the store.
    pub async fn dispatch(
        &self,
        store: &Store,
        verb: Verb,
        url: &ParsedUrl,
        body: Option<Value>,
    ) -> Result<Outcome, ApiError> {
        let resource = url.known_resource();
        debug!(%verb, resource = %url.resource, target = ?url.target, "Dispatching");

        let outcome = match verb {
            Verb::Get => self.dispatch_get(store, resource, &url.target).await?,
            Verb::Post => {
                let body = require_body(body)?;
                match resource.and_then(|r| self.create.get(&r)) {
                    Some(create) => Outcome::Created(create(store.clone(), body).await?),
                    None => Outcome::Unmatched,
                }
            }
            Verb::Put => {
                let body = require_body(body)?;
                let handler = resource.and_then(|r| self.update.get(&r));
                match (handler, url.id()) {
                    (Some(update), Some(id)) => {
                        Outcome::Updated(update(store.clone(), id, body).await?)
                    }
                    _ => Outcome::Updated(false),
                }
            }
            Verb::Delete => {
                let handler = resource.and_then(|r| self.delete.get(&r));
                match (handler, url.id()) {
                    (Some(delete), Some(id)) => Outcome::Deleted(delete(store.clone(), id).await?),
                    _ => Outcome::Deleted(0),
                }
            }
        };

        Ok(outcome)
    }

    async fn dispatch_get(
        &self,
        store: &Store,
        resource: Option<Resource>,
        target: &Target,
    ) -> Result<Outcome, ApiError> {
        let Some(resource) = resource else {
            return Ok(Outcome::Unmatched);
        };

        match target {
            Target::Collection => match self.list.get(&resource) {
                Some(list) => Ok(Outcome::Found(list(store.clone()).await?)),
                None => Ok(Outcome::Unmatched),
            },
            Target::Item(id) => match self.get.get(&resource) {
                Some(get) => Ok(get(store.clone(), *id)
                    .await?
                    .map_or(Outcome::NotFound, Outcome::Found)),
                None => Ok(Outcome::Unmatched),
            },
            Target::OutOfRange => match self.get.get(&resource) {
                Some(_) => Ok(Outcome::NotFound),
                None => Ok(Outcome::Unmatched),
            },
            Target::Query(params) => match self.pick_filter(resource, params) {
                Some((filter, value)) => Ok(Outcome::Found(filter(store.clone(), value).await?)),
                None => Ok(Outcome::Unmatched),
            },
        }
    }

    fn pick_filter(&self, resource: Resource, params: &QueryParams) -> Option<(FilterFn, String)> {
        self.filters.get(&resource)?.iter().find_map(|(name, filter)| {
            params.get(*name).map(|value| (*filter, value.clone()))
        })
    }
}

impl Default for ResourceRouter {
    fn default() -> Self {
        Self::new()
    }
}

fn require_body(body: Option<Value>) -> Result<Value, ApiError> {
    body.ok_or_else(|| ApiError::MalformedInput("request body is empty".to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal(e.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(ApiError::from)
}

fn list<T: Table>(store: Store) -> Reply<Value> {
    Box::pin(async move { to_json(&T::all(&store).await?) })
}

fn get<T: Table>(store: Store, id: i64) -> Reply<Option<Value>> {
    Box::pin(async move {
        match T::get(&store, id).await? {
            Some(record) => Ok(Some(to_json(&record)?)),
            None => Ok(None),
        }
    })
}

fn create<T: Table>(store: Store, body: Value) -> Reply<Value> {
    Box::pin(async move {
        let input: T::Input = decode(body)?;
        to_json(&T::create(&store, input).await?)
    })
}

fn update<T: Table>(store: Store, id: i64, body: Value) -> Reply<bool> {
    Box::pin(async move {
        let input: T::Input = decode(body)?;
        Ok(T::update(&store, id, input).await?)
    })
}

fn delete<T: Table>(store: Store, id: i64) -> Reply<u64> {
    Box::pin(async move { Ok(T::delete(&store, id).await?) })
}

fn list_animals_with_relations(store: Store) -> Reply<Value> {
    Box::pin(async move { to_json(&Animals::all_with_relations(&store).await?) })
}

fn animals_by_status(store: Store, status: String) -> Reply<Value> {
    Box::pin(async move { to_json(&Animals::by_status(&store, &status).await?) })
}

// A non-numeric location id can match no row.
fn animals_by_location(store: Store, location_id: String) -> Reply<Value> {
    Box::pin(async move {
        match location_id.parse::<i64>() {
            Ok(id) => to_json(&Animals::by_location(&store, id).await?),
            Err(_) => Ok(Value::Array(Vec::new())),
        }
    })
}

fn employees_by_location(store: Store, location_id: String) -> Reply<Value> {
    Box::pin(async move {
        match location_id.parse::<i64>() {
            Ok(id) => to_json(&Employees::by_location(&store, id).await?),
            Err(_) => Ok(Value::Array(Vec::new())),
        }
    })
}

fn customers_by_email(store: Store, email: String) -> Reply<Value> {
    Box::pin(async move { to_json(&Customers::by_email(&store, &email).await?) })
}
