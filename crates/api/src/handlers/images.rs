use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use rsvp_core::errors::RsvpError;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn image_key(event_id: Uuid) -> String {
    event_id.to_string()
}

fn image_content_type(headers: &HeaderMap) -> Result<String, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or_default();

    if !content_type.starts_with("image/") {
        return Err(AppError(RsvpError::BadRequest(
            "image content type must be image/*".to_string(),
        )));
    }
    Ok(content_type.to_string())
}

#[axum::debug_handler]
pub async fn put_image(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let content_type = image_content_type(&headers)?;
    if body.is_empty() {
        return Err(AppError(RsvpError::BadRequest(
            "image must not be empty".to_string(),
        )));
    }

    state.events.ensure_event_exists(id).await?;
    state
        .images
        .put(&image_key(id), body.to_vec(), &content_type)
        .await?;

    tracing::info!(event_id = %id, bytes = body.len(), content_type = %content_type, "stored event image");
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_image(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    state.events.ensure_event_exists(id).await?;

    let image = state
        .images
        .get(&image_key(id))
        .await?
        .ok_or_else(|| RsvpError::NotFound(format!("event with id {} has no image", id)))?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

#[axum::debug_handler]
pub async fn delete_image(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.events.ensure_event_exists(id).await?;

    if !state.images.remove(&image_key(id)).await? {
        return Err(AppError(RsvpError::NotFound(format!(
            "event with id {} has no image",
            id
        ))));
    }

    tracing::info!(event_id = %id, "removed event image");
    Ok(StatusCode::NO_CONTENT)
}
