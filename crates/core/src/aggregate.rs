//! Event creation.
//!
//! Rules are checked one at a time in a fixed order; the first failure is returned
//! and nothing is built. On success the organizer is materialized as a participant
//! with ACCEPTED on every slot, and each invitee with UNDECIDED on every slot.

use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    errors::{RsvpError, RsvpResult},
    models::{
        event::{Event, EventType, NewEvent, Organizer, Slot},
        participant::{Availability, AvailabilityStatus, Participant, ParticipantRole},
    },
};

/// Returns the trimmed value, or `None` when it is absent or blank.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Event {
    pub fn create(new_event: NewEvent) -> RsvpResult<Event> {
        let event_type = new_event
            .event_type
            .ok_or_else(|| RsvpError::bad_request("event type must be set"))?;

        let title = non_blank(new_event.title.as_deref())
            .ok_or_else(|| RsvpError::bad_request("title must be set"))?;

        let organizer = new_event
            .organizer
            .as_ref()
            .ok_or_else(|| RsvpError::bad_request("organizer must be set"))?;
        let organizer_email = non_blank(organizer.email.as_deref())
            .ok_or_else(|| RsvpError::bad_request("organizer email must be set"))?;
        let organizer_name = non_blank(organizer.name.as_deref())
            .ok_or_else(|| RsvpError::bad_request("organizer name must be set"))?;

        if new_event.possible_date_times.is_empty() {
            return Err(RsvpError::bad_request(
                "at least one possible date time must be set",
            ));
        }

        let mut slots: Vec<Slot> = Vec::with_capacity(new_event.possible_date_times.len());
        for (index, candidate) in new_event.possible_date_times.iter().enumerate() {
            let (start, end) = match (candidate.start_date, candidate.end_date) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    return Err(RsvpError::bad_request(format!(
                        "possible date time {} must have a start and an end date",
                        index
                    )));
                }
            };
            if start >= end {
                return Err(RsvpError::bad_request(format!(
                    "possible date time {} must start before it ends",
                    index
                )));
            }
            if slots.iter().any(|slot| slot.matches(start, end)) {
                return Err(RsvpError::bad_request(format!(
                    "possible date time {} duplicates an earlier one",
                    index
                )));
            }
            slots.push(Slot {
                id: Uuid::new_v4(),
                start,
                end,
            });
        }

        if event_type == EventType::Public {
            if slots.len() != 1 {
                return Err(RsvpError::bad_request(
                    "a PUBLIC event must have exactly one possible date time",
                ));
            }
            if !new_event.invited_participants.is_empty() {
                return Err(RsvpError::bad_request(
                    "a PUBLIC event cannot have invited participants",
                ));
            }
        }

        let mut participants = Vec::with_capacity(1 + new_event.invited_participants.len());
        participants.push(Participant {
            id: Uuid::new_v4(),
            email: organizer_email.clone(),
            name: Some(organizer_name.clone()),
            role: ParticipantRole::Organizer,
            notifications: false,
            availabilities: uniform_availability(&slots, AvailabilityStatus::Accepted),
        });

        let mut seen = HashSet::from([organizer_email.clone()]);
        for invitee in &new_event.invited_participants {
            let email = non_blank(invitee.email.as_deref())
                .ok_or_else(|| RsvpError::bad_request("invited participant email must be set"))?;
            if !seen.insert(email.clone()) {
                return Err(RsvpError::bad_request(format!(
                    "participant with email {} is listed more than once",
                    email
                )));
            }
            participants.push(Participant {
                id: Uuid::new_v4(),
                email,
                name: non_blank(invitee.name.as_deref()),
                role: ParticipantRole::Attendee,
                notifications: invitee.notifications,
                availabilities: uniform_availability(&slots, AvailabilityStatus::Undecided),
            });
        }

        Ok(Event {
            id: Uuid::new_v4(),
            event_type,
            title,
            description: non_blank(new_event.description.as_deref()),
            location: non_blank(new_event.location.as_deref()),
            location_description: non_blank(new_event.location_description.as_deref()),
            organizer: Organizer {
                name: organizer_name,
                email: organizer_email,
            },
            slots,
            participants,
            created_at: Utc::now(),
        })
    }
}

fn uniform_availability(slots: &[Slot], status: AvailabilityStatus) -> Vec<Availability> {
    slots
        .iter()
        .map(|slot| Availability {
            id: Uuid::new_v4(),
            slot_id: slot.id,
            start: slot.start,
            end: slot.end,
            status,
        })
        .collect()
}
