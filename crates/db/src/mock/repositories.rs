use async_trait::async_trait;
use mockall::mock;
use rsvp_core::{
    errors::RsvpResult,
    models::{
        event::Event,
        participant::{Availability, Participant},
        search::{EventFilter, Page},
    },
    store::{EventStore, ObjectStore, StoredObject},
};
use uuid::Uuid;

// Mock repositories for testing
mock! {
    pub EventRepo {}

    #[async_trait]
    impl EventStore for EventRepo {
        async fn find_by_id(&self, id: Uuid) -> RsvpResult<Option<Event>>;

        async fn insert_event(&self, event: &Event) -> RsvpResult<()>;

        async fn insert_participant(
            &self,
            event_id: Uuid,
            participant: &Participant,
        ) -> RsvpResult<()>;

        async fn replace_availability(
            &self,
            event_id: Uuid,
            participant_id: Uuid,
            availabilities: &[Availability],
        ) -> RsvpResult<()>;

        async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> RsvpResult<()>;

        async fn search(&self, filter: &EventFilter, page: Page) -> RsvpResult<Vec<Event>>;

        async fn count_by_event(&self, event_id: Uuid) -> RsvpResult<u64>;

        async fn count_distinct_accepted(&self, event_id: Uuid) -> RsvpResult<u64>;
    }
}

mock! {
    pub ObjectRepo {}

    #[async_trait]
    impl ObjectStore for ObjectRepo {
        async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> RsvpResult<()>;

        async fn get(&self, key: &str) -> RsvpResult<Option<StoredObject>>;

        async fn remove(&self, key: &str) -> RsvpResult<bool>;
    }
}
