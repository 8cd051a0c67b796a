use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::RsvpError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantRole {
    Organizer,
    Attendee,
}

impl ParticipantRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Organizer => "ORGANIZER",
            ParticipantRole::Attendee => "ATTENDEE",
        }
    }
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipantRole {
    type Err = RsvpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORGANIZER" => Ok(ParticipantRole::Organizer),
            "ATTENDEE" => Ok(ParticipantRole::Attendee),
            other => Err(RsvpError::bad_request(format!(
                "unknown participant role '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AvailabilityStatus {
    Accepted,
    Declined,
    Undecided,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Accepted => "ACCEPTED",
            AvailabilityStatus::Declined => "DECLINED",
            AvailabilityStatus::Undecided => "UNDECIDED",
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = RsvpError;

    /// Accepts any casing and surrounding whitespace; blank input is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        if value.is_empty() {
            return Err(RsvpError::bad_request("availability status must not be blank"));
        }
        match value.to_ascii_uppercase().as_str() {
            "ACCEPTED" => Ok(AvailabilityStatus::Accepted),
            "DECLINED" => Ok(AvailabilityStatus::Declined),
            "UNDECIDED" => Ok(AvailabilityStatus::Undecided),
            _ => Err(RsvpError::bad_request(format!(
                "unknown availability status '{}', expected ACCEPTED, DECLINED or UNDECIDED",
                value
            ))),
        }
    }
}

/// One participant's declaration against one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub id: Uuid,
    pub slot_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AvailabilityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: ParticipantRole,
    /// Whether the participant asked to be notified about changes. Only recorded.
    #[serde(default)]
    pub notifications: bool,
    pub availabilities: Vec<Availability>,
}

impl Participant {
    pub fn is_organizer(&self) -> bool {
        self.role == ParticipantRole::Organizer
    }

    pub fn has_accepted(&self) -> bool {
        self.availabilities
            .iter()
            .any(|a| a.status == AvailabilityStatus::Accepted)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendee {
    #[serde(default)]
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub notifications: bool,
    #[serde(default)]
    pub attendee_availabilities: Vec<AvailabilityEntry>,
}

/// A submitted availability line. Fields stay optional so missing values surface
/// as validation failures rather than decode errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityEntry {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub attendee_availabilities: Vec<AvailabilityEntry>,
}
