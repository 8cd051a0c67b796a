use std::sync::Arc;

use axum::http::StatusCode;
use eyre::eyre;
use mockall::predicate;
use rsvp_api::middleware::error_handling::{INTERNAL_ERROR_MESSAGE, map_error};
use rsvp_core::{errors::RsvpError, memory::InMemoryObjectStore, models::event::Event};
use rsvp_db::mock::repositories::{MockEventRepo, MockObjectRepo};
use serde_json::Value;

use crate::test_utils::{public_event_body, server_with};

#[tokio::test]
async fn test_error_handling_not_found() {
    let response = map_error(RsvpError::NotFound("Resource not found".to_string()));

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let response = map_error(RsvpError::Conflict("attendee already exists".to_string()));

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_bad_request() {
    let response = map_error(RsvpError::BadRequest("Invalid input".to_string()));

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_internal_kinds() {
    let errors = vec![
        RsvpError::Database(eyre!("Database error")),
        RsvpError::ObjectStore(eyre!("Bucket unavailable")),
        RsvpError::Internal(Box::new(std::io::Error::other("Internal error"))),
    ];

    for error in errors {
        assert_eq!(map_error(error).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[test_log::test(tokio::test)]
async fn test_storage_failure_hides_cause_behind_error_id() {
    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .returning(|_| Err(RsvpError::Database(eyre!("connection reset by peer"))));
    let server = server_with(Arc::new(events), Arc::new(InMemoryObjectStore::new()));

    let response = server
        .get("/api/events/6f1c8d1e-4f5a-4c55-9d3e-2f1f7b8b9a01")
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with(INTERNAL_ERROR_MESSAGE));
    assert!(!message.contains("connection reset"));
    let error_id = &message[INTERNAL_ERROR_MESSAGE.len()..];
    assert!(uuid::Uuid::parse_str(error_id).is_ok());
}

#[test_log::test(tokio::test)]
async fn test_failed_write_is_reported_as_internal() {
    let mut events = MockEventRepo::new();
    events
        .expect_insert_event()
        .times(1)
        .returning(|_| Err(RsvpError::Database(eyre!("disk full"))));
    let server = server_with(Arc::new(events), Arc::new(InMemoryObjectStore::new()));

    let response = server
        .post("/api/events")
        .json(&public_event_body("Launch"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_object_store_failure_is_internal() {
    let event = Event::create(serde_json::from_value(public_event_body("Launch")).unwrap()).unwrap();
    let event_id = event.id;
    let mut events = MockEventRepo::new();
    events
        .expect_find_by_id()
        .with(predicate::eq(event_id))
        .returning(move |_| Ok(Some(event.clone())));
    let mut images = MockObjectRepo::new();
    images
        .expect_get()
        .returning(|_| Err(RsvpError::ObjectStore(eyre!("bucket unavailable"))));
    let server = server_with(Arc::new(events), Arc::new(images));

    let response = server.get(&format!("/api/events/{}/image", event_id)).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}
