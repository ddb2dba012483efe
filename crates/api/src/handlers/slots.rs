//! Tutor-facing slot management handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use tutorsync_core::models::slot::{RegisterSlotsRequest, RegisterSlotsResponse, SlotResponse};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Identifies the calling tutor. Authentication happens upstream; the
/// engine only enforces slot ownership.
#[derive(Debug, Deserialize)]
pub struct TutorQuery {
    pub tutor_id: Uuid,
}

/// Register availability, split into 30-minute units. Units already on the
/// calendar are skipped, so re-submitting is harmless; the response lists
/// only what was actually created.
#[axum::debug_handler]
pub async fn register_slots(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterSlotsRequest>,
) -> Result<Json<RegisterSlotsResponse>, AppError> {
    let created = state
        .slots
        .register(payload.tutor_id, payload.start_time, payload.duration)
        .await?;

    Ok(Json(RegisterSlotsResponse {
        created: created.into_iter().map(SlotResponse::from).collect(),
    }))
}

/// Delete an unbooked slot owned by the calling tutor.
#[axum::debug_handler]
pub async fn delete_slot(
    State(state): State<Arc<ApiState>>,
    Path(slot_id): Path<Uuid>,
    Query(query): Query<TutorQuery>,
) -> Result<StatusCode, AppError> {
    state.slots.delete(slot_id, query.tutor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List everything the tutor has registered, ascending by start time.
#[axum::debug_handler]
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<TutorQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let slots = state.slots.slots_for_tutor(query.tutor_id).await?;
    Ok(Json(slots.into_iter().map(SlotResponse::from).collect()))
}
