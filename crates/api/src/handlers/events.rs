use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use rsvp_core::models::{
    event::NewEvent,
    search::SearchParams,
    view::{EventStats, EventView},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn create_event(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<NewEvent>, JsonRejection>,
) -> Result<(StatusCode, Json<EventView>), AppError> {
    let Json(new_event) = payload?;

    let view = state.events.create_event(new_event).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

#[axum::debug_handler]
pub async fn get_event(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventView>, AppError> {
    let view = state.events.get_event(id).await?;

    Ok(Json(view))
}

#[axum::debug_handler]
pub async fn find_events(
    State(state): State<Arc<ApiState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<EventView>>, AppError> {
    let Query(params) = params?;

    let views = state.events.find_events(params).await?;

    Ok(Json(views))
}

#[axum::debug_handler]
pub async fn event_stats(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventStats>, AppError> {
    let stats = state.events.event_stats(id).await?;

    Ok(Json(stats))
}
