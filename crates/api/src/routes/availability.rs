use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/student/availability/slots",
            get(handlers::availability::open_slots),
        )
        .route(
            "/api/student/availability/tutors",
            get(handlers::availability::tutors_for_date),
        )
}
