//! Student-facing availability browsing handlers.
//!
//! Both endpoints are advisory reads: they run without the booking lock,
//! and a listing can go stale the moment a concurrent booking commits. The
//! booking endpoint re-validates everything under its lock, so a stale
//! listing can only cost a student a retry, never a double booking.

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use tutorsync_core::models::availability::{TimeSlotEntry, TutorSlots};
use tutorsync_core::models::lesson::DurationType;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the open time slot listing.
#[derive(Debug, Deserialize)]
pub struct OpenSlotsQuery {
    /// Date to scan, ISO format (e.g. 2030-06-11)
    pub date: NaiveDate,

    /// Requested lesson length, THIRTY or SIXTY
    pub duration: DurationType,
}

/// Open time-of-day entries for a date and lesson length.
#[axum::debug_handler]
pub async fn open_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<OpenSlotsQuery>,
) -> Result<Json<Vec<TimeSlotEntry>>, AppError> {
    let entries = state
        .availability
        .open_slots_for_date(query.date, query.duration)
        .await?;
    Ok(Json(entries))
}

/// Query parameters for the per-tutor listing.
#[derive(Debug, Deserialize)]
pub struct TutorsQuery {
    /// Date to scan, ISO format
    pub date: NaiveDate,
}

/// Tutors with open slots on the date, each with its open times.
#[axum::debug_handler]
pub async fn tutors_for_date(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TutorsQuery>,
) -> Result<Json<Vec<TutorSlots>>, AppError> {
    let tutors = state.availability.tutors_for_date(query.date).await?;
    Ok(Json(tutors))
}
