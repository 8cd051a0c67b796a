use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rsvp_core::models::view::{EventStats, EventView};
use serde_json::{Value, json};

use crate::test_utils::{
    ORGANIZER_EMAIL, SLOT_END, SLOT_START, attendee_body, create_event, private_event_body,
    public_event_body, test_server,
};

#[test_log::test(tokio::test)]
async fn test_create_public_event() {
    let server = test_server();

    let response = server
        .post("/api/events")
        .json(&public_event_body("Launch"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let view: EventView = response.json();
    assert_eq!(view.title, "Launch");
    assert_eq!(view.organizer.email, ORGANIZER_EMAIL);
    assert_eq!(view.attendees_count, 1);
    assert_eq!(view.attendees, None);

    let raw: Value = response.json();
    assert!(raw.get("attendees").is_none());
    assert_eq!(raw["possibleDateTimes"][0]["startDate"], "2025-01-01T10:00:00Z");
}

#[test_log::test(tokio::test)]
async fn test_create_private_event_lists_participants() {
    let server = test_server();

    let response = server
        .post("/api/events")
        .json(&private_event_body("Offsite"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let view: EventView = response.json();
    let attendees = view.attendees.expect("private events list attendees");
    assert_eq!(attendees.len(), 2);
    assert_eq!(attendees[1].email, "carol@x.com");
    assert_eq!(attendees[1].availabilities.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_create_public_event_with_two_slots_is_rejected() {
    let server = test_server();
    let mut body = public_event_body("Launch");
    body["possibleDateTimes"] = json!([
        { "startDate": SLOT_START, "endDate": SLOT_END },
        { "startDate": "2025-01-02T10:00:00Z", "endDate": "2025-01-02T11:00:00Z" }
    ]);

    let response = server.post("/api/events").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert!(error["error"].as_str().unwrap().starts_with("Bad request"));
}

#[test_log::test(tokio::test)]
async fn test_create_event_with_malformed_json_is_bad_request() {
    let server = test_server();

    let response = server
        .post("/api/events")
        .json(&json!({ "eventType": "PUBLIC", "possibleDateTimes": "tomorrow" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_get_event_is_idempotent() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;

    let first: Value = server.get(&format!("/api/events/{}", id)).await.json();
    let second: Value = server.get(&format!("/api/events/{}", id)).await.json();

    assert_eq!(first, second);
    assert_eq!(first["eventId"], id.as_str());
}

#[test_log::test(tokio::test)]
async fn test_get_unknown_event_is_not_found() {
    let server = test_server();

    let response = server
        .get("/api/events/6f1c8d1e-4f5a-4c55-9d3e-2f1f7b8b9a01")
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_get_event_with_invalid_id_is_bad_request() {
    let server = test_server();

    let response = server.get("/api/events/not-a-uuid").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_find_events_by_type_and_title() {
    let server = test_server();
    create_event(&server, &public_event_body("Spring Launch")).await;
    create_event(&server, &public_event_body("Retro")).await;
    create_event(&server, &private_event_body("Launch party")).await;

    let response = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("title", "launch")
        .await;

    response.assert_status_ok();
    let views: Vec<EventView> = response.json();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].title, "Spring Launch");
}

#[test_log::test(tokio::test)]
async fn test_find_events_by_attendee_ignores_other_filters() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;
    server
        .post(&format!("/api/events/{}/attendees", id))
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("attendeeEmail", "bob@x.com")
        .add_query_param("title", "no such title")
        .await;

    response.assert_status_ok();
    let views: Vec<EventView> = response.json();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].event_id.to_string(), id);
}

#[test_log::test(tokio::test)]
async fn test_find_events_with_time_range() {
    let server = test_server();
    create_event(&server, &public_event_body("Launch")).await;

    let inside = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("startTime", "2025-01-01T09:00:00Z")
        .add_query_param("endTime", "2025-01-01T12:00:00Z")
        .await;
    let outside = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("startTime", "2025-01-01T10:30:00Z")
        .add_query_param("endTime", "2025-01-01T12:00:00Z")
        .await;

    inside.assert_status_ok();
    outside.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_find_events_requires_event_type() {
    let server = test_server();
    create_event(&server, &public_event_body("Launch")).await;

    let response = server.get("/api/events").add_query_param("title", "Launch").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::unknown_type(&[("eventType", "SECRET")])]
#[case::open_range(&[("eventType", "PUBLIC"), ("startTime", "2025-01-01T09:00:00Z")])]
#[case::reversed_range(&[
    ("eventType", "PUBLIC"),
    ("startTime", "2025-01-01T12:00:00Z"),
    ("endTime", "2025-01-01T09:00:00Z"),
])]
#[case::zero_page_size(&[("eventType", "PUBLIC"), ("pageSize", "0")])]
#[case::unparseable_time(&[("eventType", "PUBLIC"), ("startTime", "noon")])]
#[tokio::test]
async fn test_find_events_rejects_invalid_queries(#[case] query: &[(&str, &str)]) {
    let server = test_server();
    create_event(&server, &public_event_body("Launch")).await;

    let mut request = server.get("/api/events");
    for (key, value) in query {
        request = request.add_query_param(key, value);
    }
    let response = request.await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_find_events_pages() {
    let server = test_server();
    for title in ["One", "Two", "Three"] {
        create_event(&server, &public_event_body(title)).await;
    }

    let second_page: Vec<EventView> = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("pageNumber", 1)
        .add_query_param("pageSize", 2)
        .await
        .json();
    let past_the_end = server
        .get("/api/events")
        .add_query_param("eventType", "PUBLIC")
        .add_query_param("pageNumber", 5)
        .add_query_param("pageSize", 2)
        .await;

    assert_eq!(second_page.len(), 1);
    assert_eq!(second_page[0].title, "Three");
    past_the_end.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_event_stats() {
    let server = test_server();
    let id = create_event(&server, &private_event_body("Offsite")).await;
    server
        .post(&format!("/api/events/{}/attendees", id))
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get(&format!("/api/events/{}/stats", id)).await;

    response.assert_status_ok();
    let stats: EventStats = response.json();
    assert_eq!(stats.participants, 3);
    assert_eq!(stats.accepted_participants, 2);
}

#[test_log::test(tokio::test)]
async fn test_health_and_version() {
    let server = test_server();

    let health: Value = server.get("/health").await.json();
    let version: Value = server.get("/version").await.json();

    assert_eq!(health["status"], "ok");
    assert_eq!(version["name"], "rsvp-api");
}
