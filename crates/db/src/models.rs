use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use rsvp_core::models::{
    event::{Event, Organizer, Slot},
    participant::{Availability, Participant},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEvent {
    pub id: Uuid,
    pub event_type: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub location_description: Option<String>,
    pub organizer_email: String,
    pub organizer_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub event_id: Uuid,
    pub position: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbParticipant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub notifications: bool,
}

/// Availability row joined with the bounds of the slot it points at.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: Uuid,
    pub participant_id: Uuid,
    pub slot_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct DbImage {
    pub key: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub updated_at: DateTime<Utc>,
}

/// Rebuilds the aggregate from its rows.
///
/// Slots and participants keep the order they are given in; availability rows are
/// grouped under their participant in row order.
pub fn assemble_event(
    event: DbEvent,
    slots: Vec<DbSlot>,
    participants: Vec<DbParticipant>,
    availabilities: Vec<DbAvailability>,
) -> Result<Event> {
    let event_type = event
        .event_type
        .parse()
        .map_err(|e| eyre!("Invalid event type in row {}: {}", event.id, e))?;

    let mut assembled = Vec::with_capacity(participants.len());
    for participant in participants {
        let role = participant
            .role
            .parse()
            .map_err(|e| eyre!("Invalid role for participant {}: {}", participant.id, e))?;

        let mut owned = Vec::new();
        for row in availabilities.iter().filter(|a| a.participant_id == participant.id) {
            let status = row
                .status
                .parse()
                .map_err(|e| eyre!("Invalid status for availability {}: {}", row.id, e))?;
            owned.push(Availability {
                id: row.id,
                slot_id: row.slot_id,
                start: row.start_time,
                end: row.end_time,
                status,
            });
        }

        assembled.push(Participant {
            id: participant.id,
            email: participant.email,
            name: participant.name,
            role,
            notifications: participant.notifications,
            availabilities: owned,
        });
    }

    Ok(Event {
        id: event.id,
        event_type,
        title: event.title,
        description: event.description,
        location: event.location,
        location_description: event.location_description,
        organizer: Organizer {
            name: event.organizer_name,
            email: event.organizer_email,
        },
        slots: slots
            .into_iter()
            .map(|slot| Slot {
                id: slot.id,
                start: slot.start_time,
                end: slot.end_time,
            })
            .collect(),
        participants: assembled,
        created_at: event.created_at,
    })
}
