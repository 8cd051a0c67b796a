//! # Event Service
//!
//! The operations the HTTP layer calls. Each one loads the aggregate, applies the
//! registry and validator rules, persists through the [`EventStore`] and returns the
//! projected view.
//!
//! Mutations on an existing event run while holding that event's lock from
//! [`EventLocks`], so the uniqueness and slot checks always see the latest state.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    errors::{RsvpError, RsvpResult},
    locks::EventLocks,
    models::{
        event::{Event, NewEvent},
        participant::{AvailabilityEntry, NewAttendee},
        search::SearchParams,
        view::{EventStats, EventView},
    },
    projector::project,
    registry::{admit_attendee, mutable_attendee, replacement_availability},
    store::EventStore,
};

pub struct EventService {
    store: Arc<dyn EventStore>,
    locks: EventLocks,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            locks: EventLocks::new(),
        }
    }

    async fn load(&self, event_id: Uuid) -> RsvpResult<Event> {
        debug!("Loading event: id={}", event_id);
        self.store
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| RsvpError::NotFound(format!("event with id {} not found", event_id)))
    }

    pub async fn create_event(&self, new_event: NewEvent) -> RsvpResult<EventView> {
        let event = Event::create(new_event)?;
        self.store.insert_event(&event).await?;

        info!(
            event_id = %event.id,
            event_type = %event.event_type,
            slots = event.slots.len(),
            participants = event.participants.len(),
            "created event"
        );
        Ok(project(&event))
    }

    pub async fn get_event(&self, event_id: Uuid) -> RsvpResult<EventView> {
        let event = self.load(event_id).await?;
        Ok(project(&event))
    }

    pub async fn ensure_event_exists(&self, event_id: Uuid) -> RsvpResult<()> {
        self.load(event_id).await.map(|_| ())
    }

    /// Searches events. Fails with `NotFound` when the requested page is empty.
    pub async fn find_events(&self, params: SearchParams) -> RsvpResult<Vec<EventView>> {
        let (filter, page) = params.into_filter()?;
        debug!(?filter, ?page, "Searching events");

        let events = self.store.search(&filter, page).await?;
        if events.is_empty() {
            return Err(RsvpError::NotFound("no events found".to_string()));
        }
        Ok(events.iter().map(project).collect())
    }

    pub async fn add_attendee(
        &self,
        event_id: Uuid,
        attendee: NewAttendee,
    ) -> RsvpResult<EventView> {
        let _guard = self.locks.acquire(event_id).await;
        let mut event = self.load(event_id).await?;

        let participant = admit_attendee(&event, attendee)?;
        self.store.insert_participant(event_id, &participant).await?;

        info!(
            event_id = %event_id,
            participant_id = %participant.id,
            availabilities = participant.availabilities.len(),
            "added attendee"
        );
        event.participants.push(participant);
        Ok(project(&event))
    }

    /// Replaces the attendee's availability with exactly `entries`.
    pub async fn update_attendee_availability(
        &self,
        event_id: Uuid,
        email: &str,
        entries: Vec<AvailabilityEntry>,
    ) -> RsvpResult<EventView> {
        let _guard = self.locks.acquire(event_id).await;
        let mut event = self.load(event_id).await?;

        let (participant_id, availabilities) =
            replacement_availability(&event, email, &entries)?;
        self.store
            .replace_availability(event_id, participant_id, &availabilities)
            .await?;

        info!(
            event_id = %event_id,
            participant_id = %participant_id,
            availabilities = availabilities.len(),
            "replaced attendee availability"
        );
        if let Some(participant) = event.participant_mut(email) {
            participant.availabilities = availabilities;
        }
        Ok(project(&event))
    }

    pub async fn delete_attendee(&self, event_id: Uuid, email: &str) -> RsvpResult<()> {
        let _guard = self.locks.acquire(event_id).await;
        let event = self.load(event_id).await?;

        let participant_id = mutable_attendee(&event, email)?.id;
        self.store.delete_participant(event_id, participant_id).await?;

        info!(event_id = %event_id, participant_id = %participant_id, "deleted attendee");
        Ok(())
    }

    /// Participant totals. Counts only, so they are safe to expose for PUBLIC events.
    pub async fn event_stats(&self, event_id: Uuid) -> RsvpResult<EventStats> {
        self.ensure_event_exists(event_id).await?;

        let participants = self.store.count_by_event(event_id).await?;
        let accepted_participants = self.store.count_distinct_accepted(event_id).await?;

        Ok(EventStats {
            event_id,
            participants,
            accepted_participants,
        })
    }
}
