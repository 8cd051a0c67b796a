//! Participant registry rules: who may join an event and which participants may
//! be changed afterwards. Functions here only decide; persisting is the caller's job.

use uuid::Uuid;

use crate::{
    aggregate::non_blank,
    errors::{RsvpError, RsvpResult},
    models::{
        event::Event,
        participant::{Availability, AvailabilityEntry, NewAttendee, Participant, ParticipantRole},
    },
    validator::validate_availability,
};

/// Builds the participant record for a new attendee.
pub fn admit_attendee(event: &Event, attendee: NewAttendee) -> RsvpResult<Participant> {
    let email = non_blank(attendee.email.as_deref())
        .ok_or_else(|| RsvpError::bad_request("attendee email must be set"))?;

    if event.participant(&email).is_some() {
        return Err(RsvpError::Conflict(format!(
            "attendee with email {} already exists",
            email
        )));
    }

    let availabilities = validate_availability(event, &attendee.attendee_availabilities)?;

    Ok(Participant {
        id: Uuid::new_v4(),
        email,
        name: non_blank(attendee.name.as_deref()),
        role: ParticipantRole::Attendee,
        notifications: attendee.notifications,
        availabilities,
    })
}

/// Looks up an attendee that may be changed or removed. The organizer never qualifies.
pub fn mutable_attendee<'a>(event: &'a Event, email: &str) -> RsvpResult<&'a Participant> {
    let participant = event.participant(email).ok_or_else(|| {
        RsvpError::NotFound(format!(
            "attendee with email {} not found in event {}",
            email, event.id
        ))
    })?;

    if participant.is_organizer() {
        return Err(RsvpError::bad_request(
            "the organizer of an event cannot be changed or removed",
        ));
    }

    Ok(participant)
}

/// Validates a full replacement of an attendee's availability.
pub fn replacement_availability(
    event: &Event,
    email: &str,
    entries: &[AvailabilityEntry],
) -> RsvpResult<(Uuid, Vec<Availability>)> {
    let participant = mutable_attendee(event, email)?;
    let availabilities = validate_availability(event, entries)?;
    Ok((participant.id, availabilities))
}
