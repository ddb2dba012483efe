//! # Error Handling Middleware
//!
//! Maps engine failures to HTTP responses. Every failure carries the stable
//! machine code from [`BookingError::code`] next to the status, so API
//! clients can branch on the failure kind. In particular, the retryable
//! infrastructure failures (lock contention, storage errors) stay
//! distinguishable from requests that are simply invalid.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tutorsync_core::errors::BookingError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps [`BookingError`] and implements `IntoResponse`, letting
/// handlers return `Result<Json<T>, AppError>` and use `?` on engine calls.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error kinds to HTTP status codes
        let status = match &self.0 {
            BookingError::SlotNotFound | BookingError::NoAvailableTutor => StatusCode::NOT_FOUND,
            BookingError::NotSlotOwner => StatusCode::FORBIDDEN,
            BookingError::AlreadyBooked | BookingError::LockContended => StatusCode::CONFLICT,
            BookingError::InvalidStartTime
            | BookingError::StartTimePassed
            | BookingError::DateInPast
            | BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "code": self.0.code(),
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::Database(err))
    }
}
