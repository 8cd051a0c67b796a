use crate::models::DbImage;
use eyre::Result;
use sqlx::PgConnection;

pub async fn put_image(
    conn: &mut PgConnection,
    key: &str,
    bytes: &[u8],
    content_type: &str,
) -> Result<()> {
    tracing::debug!("Storing image: key={}, bytes={}", key, bytes.len());

    sqlx::query(
        r#"
        INSERT INTO event_images (key, content_type, bytes, updated_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (key) DO UPDATE
        SET content_type = EXCLUDED.content_type,
            bytes = EXCLUDED.bytes,
            updated_at = NOW()
        "#,
    )
    .bind(key)
    .bind(content_type)
    .bind(bytes)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

pub async fn get_image(conn: &mut PgConnection, key: &str) -> Result<Option<DbImage>> {
    let image = sqlx::query_as::<_, DbImage>(
        r#"
        SELECT key, content_type, bytes, updated_at
        FROM event_images
        WHERE key = $1
        "#,
    )
    .bind(key)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(image)
}

pub async fn delete_image(conn: &mut PgConnection, key: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM event_images
        WHERE key = $1
        "#,
    )
    .bind(key)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
