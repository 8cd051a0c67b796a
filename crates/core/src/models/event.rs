use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::RsvpError;
use crate::models::participant::Participant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    Public,
    Private,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Public => "PUBLIC",
            EventType::Private => "PRIVATE",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("PUBLIC") => Ok(EventType::Public),
            v if v.eq_ignore_ascii_case("PRIVATE") => Ok(EventType::Private),
            other => Err(RsvpError::bad_request(format!(
                "unknown event type '{}', expected PUBLIC or PRIVATE",
                other
            ))),
        }
    }
}

/// A candidate interval proposed when the event was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Slot {
    /// Slots are referenced by value: a submission matches only on identical bounds.
    pub fn matches(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start == start && self.end == end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub email: String,
}

/// The event aggregate. Participants and their availability are owned values;
/// nothing inside points back at the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub event_type: EventType,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub location_description: Option<String>,
    pub organizer: Organizer,
    pub slots: Vec<Slot>,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn participant(&self, email: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.email == email)
    }

    pub fn participant_mut(&mut self, email: &str) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.email == email)
    }

    pub fn find_slot(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.matches(start, end))
    }

    /// Number of distinct participants with at least one ACCEPTED slot.
    pub fn accepted_participant_count(&self) -> usize {
        self.participants.iter().filter(|p| p.has_accepted()).count()
    }

    /// True when any slot lies entirely inside `[from, to]`.
    pub fn has_slot_within(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.slots
            .iter()
            .any(|slot| slot.start >= from && slot.end <= to)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub event_type: Option<EventType>,
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    pub organizer: Option<NewOrganizer>,
    #[serde(default)]
    pub possible_date_times: Vec<NewSlot>,
    #[serde(default)]
    pub invited_participants: Vec<Invitee>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewOrganizer {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSlot {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invitee {
    #[serde(default)]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub notifications: bool,
}
