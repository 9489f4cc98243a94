//! End-to-end tests for the kennel server.
//!
//! Each test drives the full HTTP router over a private in-memory database.
//! Run with: cargo test --test integration

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use kennel_server::api::{create_router, AppState};
use kennel_server::store::seed::seed_sample_data;
use kennel_server::store::Store;

/// Router over a seeded in-memory store.
async fn seeded_app() -> Router {
    let store = Store::in_memory().await.expect("in-memory store");
    seed_sample_data(&store).await.expect("seed");
    create_router(AppState::new(store))
}

/// Router over an empty in-memory store.
async fn empty_app() -> Router {
    let store = Store::in_memory().await.expect("in-memory store");
    create_router(AppState::new(store))
}

/// Send one request and return status, headers and raw body.
async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes.to_vec())
}

/// Send a request expecting a JSON body.
async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, headers, bytes) = send(app, method, uri, body).await;
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn post_then_get_round_trips_an_animal() {
    let app = seeded_app().await;

    let submitted = json!({
        "name": "Rex",
        "status": "Admitted",
        "breed": "Lab",
        "locationId": 1,
        "customerId": 1
    });
    let (status, created) = send_json(&app, Method::POST, "/animals", Some(submitted.clone())).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("assigned id");
    for (field, value) in submitted.as_object().unwrap() {
        assert_eq!(&created[field], value, "field {field}");
    }

    let (status, fetched) = send_json(&app, Method::GET, &format!("/animals/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn created_ids_never_collide() {
    let app = seeded_app().await;

    let (_, all) = send_json(&app, Method::GET, "/locations", None).await;
    let existing: Vec<i64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_i64().unwrap())
        .collect();

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/locations",
        Some(json!({"name": "Nashville East", "address": "1 Broadway"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!existing.contains(&created["id"].as_i64().unwrap()));
}

#[tokio::test]
async fn get_collection_lists_every_record() {
    let app = seeded_app().await;

    for (path, expected) in [
        ("/animals", 4),
        ("/locations", 2),
        ("/customers", 4),
        ("/employees", 3),
    ] {
        let (status, body) = send_json(&app, Method::GET, path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), expected, "{path}");
    }
}

#[tokio::test]
async fn customers_never_expose_passwords() {
    let app = seeded_app().await;

    let (_, customers) = send_json(&app, Method::GET, "/customers", None).await;
    assert!(customers
        .as_array()
        .unwrap()
        .iter()
        .all(|c| c.get("password").is_none()));

    let (status, created) = send_json(
        &app,
        Method::POST,
        "/customers",
        Some(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "address": "1 Loop Rd",
            "password": "s3cret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
}

#[tokio::test]
async fn filter_queries_return_matching_subsets() {
    let app = seeded_app().await;

    let (_, admitted) = send_json(&app, Method::GET, "/animals?status=Admitted", None).await;
    let admitted = admitted.as_array().unwrap();
    assert_eq!(admitted.len(), 4);
    assert!(admitted.iter().all(|a| a["status"] == "Admitted"));

    let (_, at_two) = send_json(&app, Method::GET, "/animals?location_id=2", None).await;
    let at_two = at_two.as_array().unwrap();
    assert_eq!(at_two.len(), 1);
    assert_eq!(at_two[0]["name"], "Blue");

    let (_, staff) = send_json(&app, Method::GET, "/employees?location_id=1", None).await;
    assert_eq!(staff.as_array().unwrap().len(), 2);

    let (_, found) = send_json(&app, Method::GET, "/customers?email=mo@silvera.com", None).await;
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["name"], "Mo Silvera");
}

#[tokio::test]
async fn missing_record_is_404_with_empty_object() {
    let app = seeded_app().await;

    let (status, body) = send_json(&app, Method::GET, "/employees/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn unknown_resource_and_filter_yield_empty_object() {
    let app = seeded_app().await;

    let (status, body) = send_json(&app, Method::GET, "/kennels", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));

    let (status, body) = send_json(&app, Method::GET, "/locations?status=Admitted", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn put_replaces_existing_record() {
    let app = seeded_app().await;

    let replacement = json!({
        "name": "Snickers",
        "species": "Dog",
        "breed": "Chihuahua",
        "status": "Discharged",
        "location_id": 2,
        "customer_id": 4
    });
    let (status, _, body) = send(&app, Method::PUT, "/animals/1", Some(replacement)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (_, animal) = send_json(&app, Method::GET, "/animals/1", None).await;
    assert_eq!(animal["status"], "Discharged");
    assert_eq!(animal["locationId"], 2);

    let (_, untouched) = send_json(&app, Method::GET, "/animals/2", None).await;
    assert_eq!(untouched["status"], "Admitted");
}

#[tokio::test]
async fn put_on_missing_record_is_404_without_mutation() {
    let app = seeded_app().await;
    let (_, before) = send_json(&app, Method::GET, "/locations", None).await;

    let (status, _, body) = send(
        &app,
        Method::PUT,
        "/locations/50",
        Some(json!({"name": "Ghost", "address": "Nowhere"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (_, after) = send_json(&app, Method::GET, "/locations", None).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn delete_is_idempotent_and_always_204() {
    let app = seeded_app().await;

    for _ in 0..2 {
        let (status, headers, body) = send(&app, Method::DELETE, "/customers/3", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(body.is_empty());
    }

    let (_, customers) = send_json(&app, Method::GET, "/customers", None).await;
    assert_eq!(customers.as_array().unwrap().len(), 3);

    let (status, _) = send_json(&app, Method::GET, "/customers/3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_bodies_are_400() {
    let app = empty_app().await;

    let (status, headers, body) = send(&app, Method::POST, "/animals", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("empty"));

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/employees",
        Some(json!({"name": "No Location"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::PUT)
        .uri("/locations/1")
        .body(Body::from("not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn options_returns_cors_headers_for_any_path() {
    let app = empty_app().await;

    for path in ["/animals", "/animals/1", "/nothing/here", "/"] {
        let (status, headers, _) = send(&app, Method::OPTIONS, path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "X-Requested-With, Content-Type, Accept"
        );
    }
}

#[tokio::test]
async fn animal_listing_embeds_location_and_customer() {
    let app = seeded_app().await;

    let (_, animals) = send_json(&app, Method::GET, "/animals", None).await;
    let blue = animals
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["name"] == "Blue")
        .expect("Blue is seeded");

    assert_eq!(blue["location"]["name"], "Nashville South");
    assert_eq!(blue["customer"]["name"], "Mo Silvera");
    assert!(blue["customer"].get("password").is_none());
}

#[tokio::test]
async fn oversized_numeric_id_is_404_not_the_collection() {
    let app = seeded_app().await;

    let (status, body) = send_json(&app, Method::GET, "/animals/99999999999999999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({}));

    let (status, _, _) = send(&app, Method::DELETE, "/animals/99999999999999999999", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, animals) = send_json(&app, Method::GET, "/animals", None).await;
    assert_eq!(animals.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn store_failure_is_500_with_cors_and_no_driver_detail() {
    let store = Store::in_memory().await.expect("in-memory store");
    sqlx::query("DROP TABLE Animal")
        .execute(store.pool())
        .await
        .expect("drop table");
    let app = create_router(AppState::new(store));

    let (status, body) = send_json(&app, Method::GET, "/animals/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "internal server error"}));

    let (status, _) = send_json(&app, Method::GET, "/locations", None).await;
    assert_eq!(status, StatusCode::OK);
}
