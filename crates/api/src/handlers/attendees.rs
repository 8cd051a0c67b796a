use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use rsvp_core::models::{
    participant::{NewAttendee, UpdateAvailabilityRequest},
    view::EventView,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn add_attendee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    payload: Result<Json<NewAttendee>, JsonRejection>,
) -> Result<(StatusCode, Json<EventView>), AppError> {
    let Json(attendee) = payload?;

    let view = state.events.add_attendee(id, attendee).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Replaces the attendee's whole availability list with the submitted one.
#[axum::debug_handler]
pub async fn update_attendee_availability(
    State(state): State<Arc<ApiState>>,
    Path((id, email)): Path<(Uuid, String)>,
    payload: Result<Json<UpdateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<EventView>, AppError> {
    let Json(request) = payload?;

    let view = state
        .events
        .update_attendee_availability(id, &email, request.attendee_availabilities)
        .await?;

    Ok(Json(view))
}

#[axum::debug_handler]
pub async fn delete_attendee(
    State(state): State<Arc<ApiState>>,
    Path((id, email)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    state.events.delete_attendee(id, &email).await?;

    Ok(StatusCode::NO_CONTENT)
}
