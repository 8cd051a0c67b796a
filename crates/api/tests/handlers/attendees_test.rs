use axum::http::StatusCode;
use fake::{Fake, faker::internet::en::SafeEmail};
use pretty_assertions::assert_eq;
use rsvp_core::models::{participant::AvailabilityStatus, view::EventView};
use serde_json::{Value, json};

use crate::test_utils::{
    ORGANIZER_EMAIL, SECOND_SLOT_END, SECOND_SLOT_START, SLOT_END, SLOT_START, attendee_body,
    create_event, private_event_body, public_event_body, test_server,
};

#[test_log::test(tokio::test)]
async fn test_launch_attendance_flow() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;
    let attendees = format!("/api/events/{}/attendees", id);

    let added = server
        .post(&attendees)
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await;
    added.assert_status(StatusCode::CREATED);
    assert_eq!(added.json::<EventView>().attendees_count, 2);

    let again = server
        .post(&attendees)
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await;
    again.assert_status(StatusCode::CONFLICT);

    let updated = server
        .put(&format!("{}/bob@x.com", attendees))
        .json(&json!({
            "attendeeAvailabilities": [
                { "startDate": SLOT_START, "endDate": SLOT_END, "status": "DECLINED" }
            ]
        }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<EventView>().attendees_count, 1);
}

#[test_log::test(tokio::test)]
async fn test_public_response_hides_attendees() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;

    let response = server
        .post(&format!("/api/events/{}/attendees", id))
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await;

    let body = response.text();
    assert!(!body.contains("bob@x.com"));
    assert!(!body.contains("ACCEPTED"));
}

#[test_log::test(tokio::test)]
async fn test_private_update_replaces_availability() {
    let server = test_server();
    let id = create_event(&server, &private_event_body("Offsite")).await;

    let response = server
        .put(&format!("/api/events/{}/attendees/carol@x.com", id))
        .json(&json!({
            "attendeeAvailabilities": [
                { "startDate": SECOND_SLOT_START, "endDate": SECOND_SLOT_END, "status": "accepted" }
            ]
        }))
        .await;

    response.assert_status_ok();
    let view: EventView = response.json();
    let attendees = view.attendees.expect("private events list attendees");
    let carol = attendees
        .iter()
        .find(|a| a.email == "carol@x.com")
        .expect("carol is still invited");
    assert_eq!(carol.availabilities.len(), 1);
    assert_eq!(carol.availabilities[0].status, AvailabilityStatus::Accepted);
    assert_eq!(view.attendees_count, 2);
}

#[test_log::test(tokio::test)]
async fn test_add_attendee_to_unknown_event() {
    let server = test_server();

    let response = server
        .post("/api/events/6f1c8d1e-4f5a-4c55-9d3e-2f1f7b8b9a01/attendees")
        .json(&attendee_body("bob@x.com", "ACCEPTED"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_add_attendee_with_unknown_slot() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;

    let response = server
        .post(&format!("/api/events/{}/attendees", id))
        .json(&json!({
            "email": "bob@x.com",
            "attendeeAvailabilities": [
                { "startDate": SECOND_SLOT_START, "endDate": SECOND_SLOT_END, "status": "ACCEPTED" }
            ]
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert!(
        error["error"]
            .as_str()
            .unwrap()
            .contains("does not match any possible event date")
    );
}

#[test_log::test(tokio::test)]
async fn test_add_attendee_with_blank_status() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;

    let response = server
        .post(&format!("/api/events/{}/attendees", id))
        .json(&attendee_body("bob@x.com", " "))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_organizer_cannot_be_changed_or_removed() {
    let server = test_server();
    let id = create_event(&server, &private_event_body("Offsite")).await;
    let organizer = format!("/api/events/{}/attendees/{}", id, ORGANIZER_EMAIL);

    let update = server
        .put(&organizer)
        .json(&json!({ "attendeeAvailabilities": [] }))
        .await;
    let delete = server.delete(&organizer).await;

    update.assert_status(StatusCode::BAD_REQUEST);
    delete.assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_delete_attendee() {
    let server = test_server();
    let id = create_event(&server, &private_event_body("Offsite")).await;
    let carol = format!("/api/events/{}/attendees/carol@x.com", id);

    server.delete(&carol).await.assert_status(StatusCode::NO_CONTENT);
    server.delete(&carol).await.assert_status(StatusCode::NOT_FOUND);

    let view: EventView = server.get(&format!("/api/events/{}", id)).await.json();
    let attendees = view.attendees.expect("private events list attendees");
    assert_eq!(attendees.len(), 1);
    assert_eq!(attendees[0].email, ORGANIZER_EMAIL);
}

#[test_log::test(tokio::test)]
async fn test_update_unknown_attendee_is_not_found() {
    let server = test_server();
    let id = create_event(&server, &private_event_body("Offsite")).await;

    let response = server
        .put(&format!("/api/events/{}/attendees/nobody@x.com", id))
        .json(&json!({ "attendeeAvailabilities": [] }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_many_attendees_are_counted() {
    let server = test_server();
    let id = create_event(&server, &public_event_body("Launch")).await;
    let mut emails: Vec<String> = Vec::new();
    while emails.len() < 5 {
        let email: String = SafeEmail().fake();
        if email != ORGANIZER_EMAIL && !emails.contains(&email) {
            emails.push(email);
        }
    }

    for (i, email) in emails.iter().enumerate() {
        let status = if i % 2 == 0 { "ACCEPTED" } else { "UNDECIDED" };
        server
            .post(&format!("/api/events/{}/attendees", id))
            .json(&attendee_body(email, status))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let view: EventView = server.get(&format!("/api/events/{}", id)).await.json();
    assert_eq!(view.attendees_count, 4);
}

#[test_log::test(tokio::test)]
async fn test_notification_preference_visible_only_on_private_events() {
    let server = test_server();
    let private_id = create_event(&server, &private_event_body("Offsite")).await;
    let public_id = create_event(&server, &public_event_body("Launch")).await;
    let mut body = attendee_body("bob@x.com", "ACCEPTED");
    body["notifications"] = json!(true);

    let private: Value = server
        .post(&format!("/api/events/{}/attendees", private_id))
        .json(&body)
        .await
        .json();
    let public = server
        .post(&format!("/api/events/{}/attendees", public_id))
        .json(&body)
        .await;

    let bob = private["attendees"]
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["email"] == "bob@x.com")
        .unwrap();
    assert_eq!(bob["notifications"], true);
    public.assert_status(StatusCode::CREATED);
    assert!(!public.text().contains("notifications"));
}
