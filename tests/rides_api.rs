//! Integration tests for the ride CRUD surface.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};

use common::{send_empty, send_json, test_app};
use ridehail::config::AppConfig;
use ridehail::http::{build_router, AppState};
use ridehail::store::{
    collections, DeleteOutcome, Document, DocumentId, Filter, ReplaceOutcome, Store, StoreError,
    UpdateOutcome,
};

async fn create_ride(app: &Router, payload: &Value) -> String {
    let (status, body) = send_json(app, Method::POST, "/rides", payload).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().expect("id should be a string").to_string()
}

fn sample_ride() -> Value {
    json!({
        "customerId": "c-1",
        "driverId": "d-1",
        "pickup": "KL Sentral",
        "destination": "Mid Valley",
        "status": "pending",
    })
}

#[tokio::test]
async fn created_rides_show_up_in_the_listing() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(status, StatusCode::OK);

    let rides = body.as_array().expect("listing should be an array");
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0]["pickup"], "KL Sentral");
    assert_eq!(rides[0]["_id"], json!(id));
}

#[tokio::test]
async fn rides_are_stored_exactly_as_submitted() {
    let (app, _store) = test_app();
    let odd_shape = json!({
        "waypoints": ["a", "b", "c"],
        "fare": {"amount": 12.5, "currency": "MYR"},
        "flagged": false,
    });
    create_ride(&app, &odd_shape).await;

    let (_, body) = send_empty(&app, Method::GET, "/rides").await;
    let ride = &body.as_array().unwrap()[0];
    assert_eq!(ride["waypoints"], json!(["a", "b", "c"]));
    assert_eq!(ride["fare"]["currency"], "MYR");
    assert_eq!(ride["flagged"], json!(false));
}

#[tokio::test]
async fn non_object_ride_bodies_are_rejected() {
    let (app, _store) = test_app();

    for payload in [json!([1, 2, 3]), json!("pending"), json!(42)] {
        let (status, body) = send_json(&app, Method::POST, "/rides", &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid ride data"}));
    }

    let (_, body) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn patching_the_status_reports_one_modification() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/rides/{id}"),
        &json!({"status": "accepted"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updated": 1}));

    let (_, listing) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(listing[0]["status"], "accepted");
}

#[tokio::test]
async fn patching_with_the_current_status_reads_as_not_found() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    // The ride exists, but a write that changes nothing is reported the
    // same way as a missing ride.
    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/rides/{id}"),
        &json!({"status": "pending"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ride not found"}));

    let (_, listing) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(listing.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patching_without_a_status_field_writes_null() {
    let (app, store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_json(&app, Method::PATCH, &format!("/rides/{id}"), &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"updated": 1}));

    let ride = store
        .find_one(collections::RIDES, Filter::id(id.parse::<DocumentId>().unwrap()))
        .await
        .unwrap()
        .expect("ride should still exist");
    assert_eq!(ride.get("status"), Some(&Value::Null));
}

#[tokio::test]
async fn patching_an_unknown_ride_is_not_found() {
    let (app, _store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        "/rides/123e4567-e89b-12d3-a456-426614174000",
        &json!({"status": "accepted"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ride not found"}));
}

#[tokio::test]
async fn replacement_swaps_the_whole_document() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/rides/{id}"),
        &json!({"pickup": "Airport", "status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "completed"}));

    let (_, listing) = send_empty(&app, Method::GET, "/rides").await;
    let ride = &listing.as_array().unwrap()[0];
    assert_eq!(ride["pickup"], "Airport");
    assert_eq!(ride["_id"], json!(id));
    // Fields of the old document are gone, not merged.
    assert_eq!(ride.get("destination"), None);
}

#[tokio::test]
async fn replacement_ignores_a_client_supplied_id() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &format!("/rides/{id}"),
        &json!({"_id": "forged", "status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = send_empty(&app, Method::GET, "/rides").await;
    let rides = listing.as_array().unwrap();
    assert_eq!(rides.len(), 1);
    assert_eq!(rides[0]["_id"], json!(id));
}

#[tokio::test]
async fn replacement_without_a_status_returns_an_empty_body() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/rides/{id}"),
        &json!({"pickup": "Airport"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn replacing_an_unknown_ride_is_not_found() {
    let (app, _store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/rides/123e4567-e89b-12d3-a456-426614174000",
        &json!({"status": "completed"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ride not found"}));
}

#[tokio::test]
async fn deletion_is_permanent_and_reported_once() {
    let (app, _store) = test_app();
    let id = create_ride(&app, &sample_ride()).await;

    let (status, body) = send_empty(&app, Method::DELETE, &format!("/rides/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": 1}));

    let (_, listing) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(listing, json!([]));

    let (status, body) = send_empty(&app, Method::DELETE, &format!("/rides/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Ride not found"}));
}

#[tokio::test]
async fn malformed_ride_ids_are_client_errors() {
    let (app, _store) = test_app();

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        "/rides/oops",
        &json!({"status": "accepted"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid ride ID"}));

    let (status, body) = send_json(&app, Method::PUT, "/rides/oops", &json!({"status": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid ride ID"}));

    let (status, body) = send_empty(&app, Method::DELETE, "/rides/oops").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid ride ID"}));
}

/// Store stub whose every operation fails, for exercising the 500 path.
struct FailingStore;

fn outage() -> StoreError {
    StoreError::backend("injected outage")
}

#[async_trait::async_trait]
impl Store for FailingStore {
    async fn insert_one(&self, _: &str, _: Document) -> Result<DocumentId, StoreError> {
        Err(outage())
    }

    async fn insert_many(&self, _: &str, _: Vec<Document>) -> Result<Vec<DocumentId>, StoreError> {
        Err(outage())
    }

    async fn find_one(&self, _: &str, _: Filter) -> Result<Option<Document>, StoreError> {
        Err(outage())
    }

    async fn find(&self, _: &str, _: Filter) -> Result<Vec<Document>, StoreError> {
        Err(outage())
    }

    async fn count_documents(&self, _: &str, _: Filter) -> Result<u64, StoreError> {
        Err(outage())
    }

    async fn update_one(&self, _: &str, _: Filter, _: Document) -> Result<UpdateOutcome, StoreError> {
        Err(outage())
    }

    async fn replace_one(&self, _: &str, _: Filter, _: Document) -> Result<ReplaceOutcome, StoreError> {
        Err(outage())
    }

    async fn delete_one(&self, _: &str, _: Filter) -> Result<DeleteOutcome, StoreError> {
        Err(outage())
    }
}

#[tokio::test]
async fn store_failures_surface_as_internal_errors() {
    let state = AppState { store: Arc::new(FailingStore) };
    let app = build_router(&AppConfig::default(), state);

    let (status, body) = send_empty(&app, Method::GET, "/rides").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch rides"}));

    let (status, body) = send_json(&app, Method::POST, "/rides", &sample_ride()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to create ride"}));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/users",
        &json!({"name": "A", "email": "a@example.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to register user"}));
}
