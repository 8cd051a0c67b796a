use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/events",
            post(handlers::events::create_event).get(handlers::events::find_events),
        )
        .route("/api/events/:id", get(handlers::events::get_event))
        .route("/api/events/:id/stats", get(handlers::events::event_stats))
        .route(
            "/api/events/:id/attendees",
            post(handlers::attendees::add_attendee),
        )
        .route(
            "/api/events/:id/attendees/:email",
            put(handlers::attendees::update_attendee_availability)
                .delete(handlers::attendees::delete_attendee),
        )
}
