use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One open time of day in an availability listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotEntry {
    /// "HH:MM"
    pub time: String,
    pub available: bool,
}

/// A tutor's open times on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorSlots {
    pub tutor_id: Uuid,
    /// Chronological "HH:MM" labels
    pub available_times: Vec<String>,
}
