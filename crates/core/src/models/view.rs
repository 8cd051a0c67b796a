use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    event::{EventType, Organizer},
    participant::{AvailabilityStatus, ParticipantRole},
};

/// Caller-facing shape of an event.
///
/// `attendees` is only ever populated for PRIVATE events and is left out of the
/// serialized form entirely otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub location_description: Option<String>,
    pub organizer: Organizer,
    pub possible_date_times: Vec<SlotView>,
    pub attendees_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<AttendeeView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotView {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeView {
    pub name: Option<String>,
    pub email: String,
    pub role: ParticipantRole,
    pub notifications: bool,
    pub availabilities: Vec<AvailabilityView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityView {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: AvailabilityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub event_id: Uuid,
    pub participants: u64,
    pub accepted_participants: u64,
}
