use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    errors::RsvpResult,
    models::{
        event::Event,
        participant::{Availability, Participant},
        search::{EventFilter, Page},
    },
};

/// Durable storage for event aggregates.
///
/// Every mutating method is atomic: all rows it writes land together or not at all.
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Loads the full aggregate, slots and participants in insertion order.
    async fn find_by_id(&self, id: Uuid) -> RsvpResult<Option<Event>>;

    /// Persists a newly created event together with its participants.
    async fn insert_event(&self, event: &Event) -> RsvpResult<()>;

    /// Adds a participant and its availability to an existing event.
    ///
    /// Fails with `Conflict` when the email is already used in that event.
    async fn insert_participant(&self, event_id: Uuid, participant: &Participant)
    -> RsvpResult<()>;

    /// Deletes every availability row of the participant, then inserts `availabilities`.
    async fn replace_availability(
        &self,
        event_id: Uuid,
        participant_id: Uuid,
        availabilities: &[Availability],
    ) -> RsvpResult<()>;

    /// Removes the participant and its availability rows.
    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> RsvpResult<()>;

    /// Returns one page of matching events ordered by creation time, then id.
    async fn search(&self, filter: &EventFilter, page: Page) -> RsvpResult<Vec<Event>>;

    async fn count_by_event(&self, event_id: Uuid) -> RsvpResult<u64>;

    /// Distinct participants holding at least one ACCEPTED availability.
    async fn count_distinct_accepted(&self, event_id: Uuid) -> RsvpResult<u64>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Binary storage for event images, keyed by event id.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> RsvpResult<()>;

    async fn get(&self, key: &str) -> RsvpResult<Option<StoredObject>>;

    /// Returns whether an object was removed.
    async fn remove(&self, key: &str) -> RsvpResult<bool>;
}
