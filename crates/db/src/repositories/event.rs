use crate::models::{DbEvent, DbSlot};
use eyre::Result;
use rsvp_core::models::{
    event::Event,
    search::{EventFilter, Page},
};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use uuid::Uuid;

pub async fn insert_event(conn: &mut PgConnection, event: &Event) -> Result<()> {
    tracing::debug!(
        "Inserting event: id={}, type={}, slots={}",
        event.id,
        event.event_type,
        event.slots.len()
    );

    sqlx::query(
        r#"
        INSERT INTO events (
            id, event_type, title, description, location, location_description,
            organizer_email, organizer_name, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(event.id)
    .bind(event.event_type.as_str())
    .bind(&event.title)
    .bind(&event.description)
    .bind(&event.location)
    .bind(&event.location_description)
    .bind(&event.organizer.email)
    .bind(&event.organizer.name)
    .bind(event.created_at)
    .execute(&mut *conn)
    .await?;

    for (position, slot) in event.slots.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO event_slots (id, event_id, position, start_time, end_time)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(slot.id)
        .bind(event.id)
        .bind(position as i32)
        .bind(slot.start)
        .bind(slot.end)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn get_event_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<DbEvent>> {
    let event = sqlx::query_as::<_, DbEvent>(
        r#"
        SELECT id, event_type, title, description, location, location_description,
               organizer_email, organizer_name, created_at
        FROM events
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(event)
}

/// Takes the row lock that serializes writers on one event for the rest of the transaction.
pub async fn lock_event(conn: &mut PgConnection, id: Uuid) -> Result<bool> {
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM events
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(locked.is_some())
}

pub async fn get_slots_by_event_id(conn: &mut PgConnection, event_id: Uuid) -> Result<Vec<DbSlot>> {
    let slots = sqlx::query_as::<_, DbSlot>(
        r#"
        SELECT id, event_id, position, start_time, end_time
        FROM event_slots
        WHERE event_id = $1
        ORDER BY position ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(slots)
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Returns the ids of one page of matching events.
///
/// With an attendee email the query joins on participant membership and applies
/// no other optional filter.
pub async fn search_event_ids(
    conn: &mut PgConnection,
    filter: &EventFilter,
    page: Page,
) -> Result<Vec<Uuid>> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT e.id FROM events e ");

    if let Some(attendee_email) = &filter.attendee_email {
        query
            .push("JOIN event_participants p ON p.event_id = e.id WHERE p.email = ")
            .push_bind(attendee_email.clone())
            .push(" AND e.event_type = ")
            .push_bind(filter.event_type.as_str());
    } else {
        query
            .push("WHERE e.event_type = ")
            .push_bind(filter.event_type.as_str());

        if let Some(title) = &filter.title {
            query
                .push(" AND e.title ILIKE ")
                .push_bind(format!("%{}%", escape_like(title)));
        }
        if let Some(organizer_email) = &filter.organizer_email {
            query
                .push(" AND e.organizer_email = ")
                .push_bind(organizer_email.clone());
        }
        if let Some(range) = &filter.time_range {
            query
                .push(" AND EXISTS (SELECT 1 FROM event_slots s WHERE s.event_id = e.id AND s.start_time >= ")
                .push_bind(range.start)
                .push(" AND s.end_time <= ")
                .push_bind(range.end)
                .push(")");
        }
    }

    query
        .push(" ORDER BY e.created_at ASC, e.id ASC LIMIT ")
        .push_bind(i64::from(page.size))
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);

    let ids = query
        .build_query_scalar::<Uuid>()
        .fetch_all(&mut *conn)
        .await?;

    Ok(ids)
}
