use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{RsvpError, RsvpResult},
    models::{
        event::Event,
        participant::{Availability, Participant},
        search::{EventFilter, Page},
    },
    store::{EventStore, ObjectStore, StoredObject},
};

/// In-memory event store for tests and local runs.
///
/// Mirrors the PostgreSQL store's contract, including the per-event email
/// uniqueness check on participant insert.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<Vec<Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }
}

fn event_not_found(event_id: Uuid) -> RsvpError {
    RsvpError::NotFound(format!("event with id {} not found", event_id))
}

fn matches_filter(event: &Event, filter: &EventFilter) -> bool {
    if event.event_type != filter.event_type {
        return false;
    }

    // Membership search ignores every other optional filter.
    if let Some(email) = &filter.attendee_email {
        return event.participant(email).is_some();
    }

    if let Some(title) = &filter.title {
        if !event.title.to_lowercase().contains(&title.to_lowercase()) {
            return false;
        }
    }
    if let Some(organizer_email) = &filter.organizer_email {
        if &event.organizer.email != organizer_email {
            return false;
        }
    }
    if let Some(range) = &filter.time_range {
        if !event.has_slot_within(range.start, range.end) {
            return false;
        }
    }
    true
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn find_by_id(&self, id: Uuid) -> RsvpResult<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_event(&self, event: &Event) -> RsvpResult<()> {
        let mut events = self.events.write().await;
        if events.iter().any(|e| e.id == event.id) {
            return Err(RsvpError::Conflict(format!(
                "event with id {} already exists",
                event.id
            )));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn insert_participant(
        &self,
        event_id: Uuid,
        participant: &Participant,
    ) -> RsvpResult<()> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| event_not_found(event_id))?;

        if event.participant(&participant.email).is_some() {
            return Err(RsvpError::Conflict(format!(
                "attendee with email {} already exists",
                participant.email
            )));
        }
        event.participants.push(participant.clone());
        Ok(())
    }

    async fn replace_availability(
        &self,
        event_id: Uuid,
        participant_id: Uuid,
        availabilities: &[Availability],
    ) -> RsvpResult<()> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| event_not_found(event_id))?;
        let participant = event
            .participants
            .iter_mut()
            .find(|p| p.id == participant_id)
            .ok_or_else(|| {
                RsvpError::NotFound(format!("participant with id {} not found", participant_id))
            })?;

        participant.availabilities = availabilities.to_vec();
        Ok(())
    }

    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> RsvpResult<()> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| event_not_found(event_id))?;

        let before = event.participants.len();
        event.participants.retain(|p| p.id != participant_id);
        if event.participants.len() == before {
            return Err(RsvpError::NotFound(format!(
                "participant with id {} not found",
                participant_id
            )));
        }
        Ok(())
    }

    async fn search(&self, filter: &EventFilter, page: Page) -> RsvpResult<Vec<Event>> {
        let events = self.events.read().await;
        let mut matching: Vec<&Event> = events.iter().filter(|e| matches_filter(e, filter)).collect();
        // Stable sort keeps insertion order for identical timestamps.
        matching.sort_by_key(|e| e.created_at);

        Ok(matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .cloned()
            .collect())
    }

    async fn count_by_event(&self, event_id: Uuid) -> RsvpResult<u64> {
        let events = self.events.read().await;
        let event = events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| event_not_found(event_id))?;
        Ok(event.participants.len() as u64)
    }

    async fn count_distinct_accepted(&self, event_id: Uuid) -> RsvpResult<u64> {
        let events = self.events.read().await;
        let event = events
            .iter()
            .find(|e| e.id == event_id)
            .ok_or_else(|| event_not_found(event_id))?;
        Ok(event.accepted_participant_count() as u64)
    }
}

/// In-memory object store.
#[derive(Clone, Default)]
pub struct InMemoryObjectStore {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> RsvpResult<()> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> RsvpResult<Option<StoredObject>> {
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> RsvpResult<bool> {
        Ok(self.objects.write().await.remove(key).is_some())
    }
}
