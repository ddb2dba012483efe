use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/tutor/availabilities",
            post(handlers::slots::register_slots),
        )
        .route(
            "/api/tutor/availabilities",
            get(handlers::slots::list_slots),
        )
        .route(
            "/api/tutor/availabilities/:id",
            delete(handlers::slots::delete_slot),
        )
}
