#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rsvp_core::models::{
    event::{EventType, Invitee, NewEvent, NewOrganizer, NewSlot},
    participant::{AvailabilityEntry, NewAttendee},
};

pub const ORGANIZER_EMAIL: &str = "alice@x.com";

/// 2025-01-01 at the given hour, UTC.
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, hour, 0, 0).unwrap()
}

pub fn slot(start_hour: u32, end_hour: u32) -> NewSlot {
    NewSlot {
        start_date: Some(at(start_hour)),
        end_date: Some(at(end_hour)),
    }
}

pub fn entry(start_hour: u32, end_hour: u32, status: &str) -> AvailabilityEntry {
    AvailabilityEntry {
        start_date: Some(at(start_hour)),
        end_date: Some(at(end_hour)),
        status: Some(status.to_string()),
    }
}

pub fn new_event(event_type: EventType, slots: Vec<NewSlot>) -> NewEvent {
    NewEvent {
        event_type: Some(event_type),
        title: Some("Launch".to_string()),
        description: Some("Product launch".to_string()),
        location: Some("HQ".to_string()),
        location_description: Some("Second floor".to_string()),
        organizer: Some(NewOrganizer {
            name: Some("Alice".to_string()),
            email: Some(ORGANIZER_EMAIL.to_string()),
        }),
        possible_date_times: slots,
        invited_participants: vec![],
    }
}

pub fn invitee(email: &str) -> Invitee {
    Invitee {
        name: None,
        email: Some(email.to_string()),
        notifications: false,
    }
}

pub fn attendee(email: &str, entries: Vec<AvailabilityEntry>) -> NewAttendee {
    NewAttendee {
        name: Some("Bob".to_string()),
        email: Some(email.to_string()),
        notifications: false,
        attendee_availabilities: entries,
    }
}
