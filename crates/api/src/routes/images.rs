use axum::{Router, extract::DefaultBodyLimit, routing::put};
use std::sync::Arc;

use crate::{ApiState, handlers};

/// Image routes accept bodies up to `max_image_bytes`; larger uploads get 413.
pub fn routes(max_image_bytes: usize) -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/events/:id/image",
            put(handlers::images::put_image)
                .get(handlers::images::get_image)
                .delete(handlers::images::delete_image),
        )
        .layer(DefaultBodyLimit::max(max_image_bytes))
}
