use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::lesson::DurationType;

/// An atomic 30-minute unit of bookable time owned by one tutor.
///
/// `end_time` is always `start_time + 30min`, and a tutor holds at most one
/// slot per start time. `booked` flips to true exactly once, atomically
/// with the lesson that consumes the slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSlotsRequest {
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration: DurationType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterSlotsResponse {
    pub created: Vec<SlotResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotResponse {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked: bool,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            booked: slot.booked,
        }
    }
}
