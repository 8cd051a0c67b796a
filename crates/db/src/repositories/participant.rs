use crate::models::DbParticipant;
use eyre::Result;
use rsvp_core::models::participant::Participant;
use sqlx::PgConnection;
use uuid::Uuid;

pub async fn insert_participant(
    conn: &mut PgConnection,
    event_id: Uuid,
    participant: &Participant,
) -> Result<()> {
    tracing::debug!(
        "Inserting participant: event_id={}, participant_id={}, role={}",
        event_id,
        participant.id,
        participant.role
    );

    sqlx::query(
        r#"
        INSERT INTO event_participants (id, event_id, email, name, role, notifications)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(participant.id)
    .bind(event_id)
    .bind(&participant.email)
    .bind(&participant.name)
    .bind(participant.role.as_str())
    .bind(participant.notifications)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn get_participants_by_event_id(
    conn: &mut PgConnection,
    event_id: Uuid,
) -> Result<Vec<DbParticipant>> {
    let participants = sqlx::query_as::<_, DbParticipant>(
        r#"
        SELECT id, event_id, email, name, role, notifications
        FROM event_participants
        WHERE event_id = $1
        ORDER BY seq ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(participants)
}

pub async fn delete_participant(
    conn: &mut PgConnection,
    event_id: Uuid,
    participant_id: Uuid,
) -> Result<bool> {
    tracing::debug!(
        "Deleting participant: event_id={}, participant_id={}",
        event_id,
        participant_id
    );

    let result = sqlx::query(
        r#"
        DELETE FROM event_participants
        WHERE event_id = $1 AND id = $2
        "#,
    )
    .bind(event_id)
    .bind(participant_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_by_event(conn: &mut PgConnection, event_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM event_participants
        WHERE event_id = $1
        "#,
    )
    .bind(event_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}
