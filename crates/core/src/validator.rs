//! Availability validation.
//!
//! Submissions are checked against the event's slots in a fixed order and the
//! first failing rule is reported:
//!
//! 1. every entry carries a start date, an end date and a status
//! 2. no more entries than the event has slots
//! 3. every (start, end) pair equals an existing slot, each slot at most once
//! 4. every status is a recognized value
//!
//! A successful run yields the complete replacement set for one participant.

use std::collections::HashSet;
use uuid::Uuid;

use crate::{
    errors::{RsvpError, RsvpResult},
    models::{
        event::Event,
        participant::{Availability, AvailabilityEntry, AvailabilityStatus},
    },
};

pub fn validate_availability(
    event: &Event,
    entries: &[AvailabilityEntry],
) -> RsvpResult<Vec<Availability>> {
    let mut complete = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let start = entry.start_date.ok_or_else(|| {
            RsvpError::bad_request(format!("availability {}: start date must be set", index))
        })?;
        let end = entry.end_date.ok_or_else(|| {
            RsvpError::bad_request(format!("availability {}: end date must be set", index))
        })?;
        let status = entry.status.as_deref().ok_or_else(|| {
            RsvpError::bad_request(format!("availability {}: status must be set", index))
        })?;
        complete.push((start, end, status));
    }

    if complete.len() > event.slots.len() {
        return Err(RsvpError::bad_request(format!(
            "{} availabilities submitted but the event only has {} possible date times",
            complete.len(),
            event.slots.len()
        )));
    }

    let mut matched = Vec::with_capacity(complete.len());
    let mut used = HashSet::new();
    for (start, end, status) in complete {
        let slot = event.find_slot(start, end).ok_or_else(|| {
            RsvpError::bad_request(format!(
                "availability with start time: {} and end time: {} does not match any possible event date",
                start.to_rfc3339(),
                end.to_rfc3339()
            ))
        })?;
        if !used.insert(slot.id) {
            return Err(RsvpError::bad_request(format!(
                "availability with start time: {} and end time: {} was submitted more than once",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        matched.push((slot, status));
    }

    matched
        .into_iter()
        .map(|(slot, status)| {
            let status: AvailabilityStatus = status.parse()?;
            Ok(Availability {
                id: Uuid::new_v4(),
                slot_id: slot.id,
                start: slot.start,
                end: slot.end,
                status,
            })
        })
        .collect()
}
