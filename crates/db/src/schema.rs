use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create events table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS events (
            id UUID PRIMARY KEY,
            event_type VARCHAR(16) NOT NULL,
            title VARCHAR(255) NOT NULL,
            description TEXT NULL,
            location TEXT NULL,
            location_description TEXT NULL,
            organizer_email VARCHAR(255) NOT NULL,
            organizer_name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_event_type CHECK (event_type IN ('PUBLIC', 'PRIVATE'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_slots (
            id UUID PRIMARY KEY,
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            CONSTRAINT valid_slot_range CHECK (end_time > start_time),
            CONSTRAINT unique_event_slot UNIQUE (event_id, start_time, end_time)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_participants table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_participants (
            id UUID PRIMARY KEY,
            seq BIGSERIAL NOT NULL,
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            email VARCHAR(255) NOT NULL,
            name VARCHAR(255) NULL,
            role VARCHAR(16) NOT NULL,
            notifications BOOLEAN NOT NULL DEFAULT FALSE,
            CONSTRAINT valid_participant_role CHECK (role IN ('ORGANIZER', 'ATTENDEE')),
            CONSTRAINT unique_event_participant_email UNIQUE (event_id, email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create participant_availabilities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS participant_availabilities (
            id UUID PRIMARY KEY,
            event_id UUID NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            participant_id UUID NOT NULL REFERENCES event_participants(id) ON DELETE CASCADE,
            slot_id UUID NOT NULL REFERENCES event_slots(id) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            status VARCHAR(16) NOT NULL,
            CONSTRAINT valid_availability_status CHECK (status IN ('ACCEPTED', 'DECLINED', 'UNDECIDED')),
            CONSTRAINT unique_participant_slot UNIQUE (participant_id, slot_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create event_images table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS event_images (
            key VARCHAR(255) PRIMARY KEY,
            content_type VARCHAR(255) NOT NULL,
            bytes BYTEA NOT NULL,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Upgrade older tables and create indexes (several statements, so this goes through the simple query protocol)
    pool.execute(
        r#"
        ALTER TABLE event_participants
            ADD COLUMN IF NOT EXISTS notifications BOOLEAN NOT NULL DEFAULT FALSE;
        CREATE UNIQUE INDEX IF NOT EXISTS idx_one_organizer_per_event
            ON event_participants(event_id) WHERE role = 'ORGANIZER';
        CREATE INDEX IF NOT EXISTS idx_events_type_created ON events(event_type, created_at, id);
        CREATE INDEX IF NOT EXISTS idx_events_organizer_email ON events(organizer_email);
        CREATE INDEX IF NOT EXISTS idx_event_slots_event_id ON event_slots(event_id);
        CREATE INDEX IF NOT EXISTS idx_event_participants_email ON event_participants(email);
        CREATE INDEX IF NOT EXISTS idx_availabilities_event_id ON participant_availabilities(event_id);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
