use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/student/lessons", post(handlers::lessons::book_lesson))
        .route("/api/student/lessons", get(handlers::lessons::list_lessons))
}
