use crate::models::{
    event::{Event, EventType},
    view::{AttendeeView, AvailabilityView, EventView, SlotView},
};

/// Builds the view a caller receives for `event`.
///
/// PRIVATE events list every participant with their per-slot status. PUBLIC events
/// only carry `attendees_count`; no field of the view identifies an attendee.
pub fn project(event: &Event) -> EventView {
    let attendees = match event.event_type {
        EventType::Private => Some(
            event
                .participants
                .iter()
                .map(|participant| AttendeeView {
                    name: participant.name.clone(),
                    email: participant.email.clone(),
                    role: participant.role,
                    notifications: participant.notifications,
                    availabilities: participant
                        .availabilities
                        .iter()
                        .map(|availability| AvailabilityView {
                            start_date: availability.start,
                            end_date: availability.end,
                            status: availability.status,
                        })
                        .collect(),
                })
                .collect(),
        ),
        EventType::Public => None,
    };

    EventView {
        event_id: event.id,
        event_type: event.event_type,
        title: event.title.clone(),
        description: event.description.clone(),
        location: event.location.clone(),
        location_description: event.location_description.clone(),
        organizer: event.organizer.clone(),
        possible_date_times: event
            .slots
            .iter()
            .map(|slot| SlotView {
                start_date: slot.start,
                end_date: slot.end,
            })
            .collect(),
        attendees_count: event.accepted_participant_count(),
        attendees,
    }
}
