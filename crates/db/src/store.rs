//! PostgreSQL implementations of the core storage traits.
//!
//! Every mutation runs in a SERIALIZABLE transaction that first locks the event row,
//! so writers on one event queue behind each other across processes as well.

use async_trait::async_trait;
use eyre::{Report, WrapErr};
use rsvp_core::{
    errors::{RsvpError, RsvpResult},
    models::{
        event::Event,
        participant::{Availability, Participant},
        search::{EventFilter, Page},
    },
    store::{EventStore, ObjectStore, StoredObject},
};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    DbPool,
    models::assemble_event,
    repositories::{availability, event, image, participant},
};

const SERIALIZATION_FAILURE: &str = "40001";

/// Translates a storage failure into the domain error callers branch on.
fn storage_error(report: Report) -> RsvpError {
    if let Some(sqlx::Error::Database(db_error)) = report.downcast_ref::<sqlx::Error>() {
        if db_error.is_unique_violation() {
            return RsvpError::Conflict(format!(
                "a record with the same key already exists: {}",
                db_error.message()
            ));
        }
        if db_error.code().as_deref() == Some(SERIALIZATION_FAILURE) {
            return RsvpError::Conflict(
                "the event was modified concurrently, retry the request".to_string(),
            );
        }
    }
    RsvpError::Database(report)
}

fn sqlx_error(error: sqlx::Error) -> RsvpError {
    storage_error(Report::new(error))
}

fn event_not_found(event_id: Uuid) -> RsvpError {
    RsvpError::NotFound(format!("event with id {} not found", event_id))
}

async fn load_event(conn: &mut PgConnection, id: Uuid) -> eyre::Result<Option<Event>> {
    let Some(row) = event::get_event_by_id(conn, id).await? else {
        return Ok(None);
    };

    let slots = event::get_slots_by_event_id(conn, id).await?;
    let participants = participant::get_participants_by_event_id(conn, id).await?;
    let availabilities = availability::get_availabilities_by_event_id(conn, id).await?;

    let assembled = assemble_event(row, slots, participants, availabilities)
        .wrap_err_with(|| format!("Failed to assemble event {}", id))?;
    Ok(Some(assembled))
}

#[derive(Clone)]
pub struct PgEventStore {
    pool: DbPool,
}

impl PgEventStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Read-only snapshot so the several reads behind one aggregate agree with each other.
    async fn begin_snapshot(&self) -> RsvpResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self.pool.begin().await.map_err(sqlx_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        Ok(tx)
    }

    async fn begin(&self) -> RsvpResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self.pool.begin().await.map_err(sqlx_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await
            .map_err(sqlx_error)?;
        Ok(tx)
    }

    /// Opens a transaction holding the event's row lock, or fails with `NotFound`.
    async fn begin_locked(
        &self,
        event_id: Uuid,
    ) -> RsvpResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        let mut tx = self.begin().await?;
        let exists = event::lock_event(&mut tx, event_id)
            .await
            .map_err(storage_error)?;
        if !exists {
            return Err(event_not_found(event_id));
        }
        Ok(tx)
    }
}

#[async_trait]
impl EventStore for PgEventStore {
    async fn find_by_id(&self, id: Uuid) -> RsvpResult<Option<Event>> {
        let mut tx = self.begin_snapshot().await?;
        let found = load_event(&mut tx, id).await.map_err(storage_error)?;
        tx.commit().await.map_err(sqlx_error)?;
        Ok(found)
    }

    async fn insert_event(&self, new_event: &Event) -> RsvpResult<()> {
        let mut tx = self.begin().await?;

        event::insert_event(&mut tx, new_event)
            .await
            .map_err(storage_error)?;
        for member in &new_event.participants {
            participant::insert_participant(&mut tx, new_event.id, member)
                .await
                .map_err(storage_error)?;
            availability::insert_availabilities(
                &mut tx,
                new_event.id,
                member.id,
                &member.availabilities,
            )
            .await
            .map_err(storage_error)?;
        }

        tx.commit().await.map_err(sqlx_error)
    }

    async fn insert_participant(
        &self,
        event_id: Uuid,
        member: &Participant,
    ) -> RsvpResult<()> {
        let mut tx = self.begin_locked(event_id).await?;

        participant::insert_participant(&mut tx, event_id, member)
            .await
            .map_err(|e| match storage_error(e) {
                RsvpError::Conflict(_) => RsvpError::Conflict(format!(
                    "attendee with email {} already exists",
                    member.email
                )),
                other => other,
            })?;
        availability::insert_availabilities(&mut tx, event_id, member.id, &member.availabilities)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(sqlx_error)
    }

    async fn replace_availability(
        &self,
        event_id: Uuid,
        participant_id: Uuid,
        availabilities: &[Availability],
    ) -> RsvpResult<()> {
        let mut tx = self.begin_locked(event_id).await?;

        availability::delete_availabilities_for_participant(&mut tx, participant_id)
            .await
            .map_err(storage_error)?;
        availability::insert_availabilities(&mut tx, event_id, participant_id, availabilities)
            .await
            .map_err(storage_error)?;

        tx.commit().await.map_err(sqlx_error)
    }

    async fn delete_participant(&self, event_id: Uuid, participant_id: Uuid) -> RsvpResult<()> {
        let mut tx = self.begin_locked(event_id).await?;

        availability::delete_availabilities_for_participant(&mut tx, participant_id)
            .await
            .map_err(storage_error)?;
        let deleted = participant::delete_participant(&mut tx, event_id, participant_id)
            .await
            .map_err(storage_error)?;
        if !deleted {
            return Err(RsvpError::NotFound(format!(
                "participant with id {} not found",
                participant_id
            )));
        }

        tx.commit().await.map_err(sqlx_error)
    }

    async fn search(&self, filter: &EventFilter, page: Page) -> RsvpResult<Vec<Event>> {
        let mut tx = self.begin_snapshot().await?;

        let ids = event::search_event_ids(&mut tx, filter, page)
            .await
            .map_err(storage_error)?;

        let mut events = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(found) = load_event(&mut tx, id).await.map_err(storage_error)? {
                events.push(found);
            }
        }
        tx.commit().await.map_err(sqlx_error)?;
        Ok(events)
    }

    async fn count_by_event(&self, event_id: Uuid) -> RsvpResult<u64> {
        let mut conn = self.pool.acquire().await.map_err(sqlx_error)?;
        let count = participant::count_by_event(&mut conn, event_id)
            .await
            .map_err(storage_error)?;
        Ok(count.max(0) as u64)
    }

    async fn count_distinct_accepted(&self, event_id: Uuid) -> RsvpResult<u64> {
        let mut conn = self.pool.acquire().await.map_err(sqlx_error)?;
        let count = availability::count_distinct_accepted(&mut conn, event_id)
            .await
            .map_err(storage_error)?;
        Ok(count.max(0) as u64)
    }
}

/// Image bytes kept in the `event_images` table.
#[derive(Clone)]
pub struct PgObjectStore {
    pool: DbPool,
}

impl PgObjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ObjectStore for PgObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> RsvpResult<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RsvpError::ObjectStore(e.into()))?;
        image::put_image(&mut conn, key, &bytes, content_type)
            .await
            .map_err(RsvpError::ObjectStore)
    }

    async fn get(&self, key: &str) -> RsvpResult<Option<StoredObject>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RsvpError::ObjectStore(e.into()))?;
        let found = image::get_image(&mut conn, key)
            .await
            .map_err(RsvpError::ObjectStore)?;
        Ok(found.map(|row| StoredObject {
            bytes: row.bytes,
            content_type: row.content_type,
        }))
    }

    async fn remove(&self, key: &str) -> RsvpResult<bool> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RsvpError::ObjectStore(e.into()))?;
        image::delete_image(&mut conn, key)
            .await
            .map_err(RsvpError::ObjectStore)
    }
}
