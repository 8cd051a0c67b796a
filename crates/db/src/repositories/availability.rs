use crate::models::DbAvailability;
use eyre::Result;
use rsvp_core::models::participant::Availability;
use sqlx::PgConnection;
use uuid::Uuid;

pub async fn insert_availabilities(
    conn: &mut PgConnection,
    event_id: Uuid,
    participant_id: Uuid,
    availabilities: &[Availability],
) -> Result<()> {
    for (position, availability) in availabilities.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO participant_availabilities (id, event_id, participant_id, slot_id, position, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(availability.id)
        .bind(event_id)
        .bind(participant_id)
        .bind(availability.slot_id)
        .bind(position as i32)
        .bind(availability.status.as_str())
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

pub async fn get_availabilities_by_event_id(
    conn: &mut PgConnection,
    event_id: Uuid,
) -> Result<Vec<DbAvailability>> {
    let availabilities = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT a.id, a.participant_id, a.slot_id, s.start_time, s.end_time, a.status
        FROM participant_availabilities a
        JOIN event_slots s ON s.id = a.slot_id
        WHERE a.event_id = $1
        ORDER BY a.participant_id, a.position ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(availabilities)
}

pub async fn delete_availabilities_for_participant(
    conn: &mut PgConnection,
    participant_id: Uuid,
) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM participant_availabilities
        WHERE participant_id = $1
        "#,
    )
    .bind(participant_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Participants with at least one ACCEPTED entry on the event.
pub async fn count_distinct_accepted(conn: &mut PgConnection, event_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT participant_id)
        FROM participant_availabilities
        WHERE event_id = $1 AND status = 'ACCEPTED'
        "#,
    )
    .bind(event_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}
