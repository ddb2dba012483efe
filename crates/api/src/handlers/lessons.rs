//! Lesson booking handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tutorsync_core::models::lesson::{BookLessonRequest, LessonResponse};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Book a lesson against the requested tutor, optionally allowing the
/// engine to substitute another tutor with the same window open. The call
/// serializes against concurrent bookings of the same (tutor, start time)
/// and either returns the confirmed lesson or a business failure; there is
/// no pending state.
#[axum::debug_handler]
pub async fn book_lesson(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookLessonRequest>,
) -> Result<Json<LessonResponse>, AppError> {
    let lesson = state.booking.book(payload).await?;
    Ok(Json(lesson.into()))
}

/// Identifies the calling student; identity is validated upstream.
#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub student_id: Uuid,
}

/// The student's booked lessons, newest start time first.
#[axum::debug_handler]
pub async fn list_lessons(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StudentQuery>,
) -> Result<Json<Vec<LessonResponse>>, AppError> {
    let lessons = state.booking.lessons_for_student(query.student_id).await?;
    Ok(Json(lessons.into_iter().map(LessonResponse::from).collect()))
}
