use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quantize::SLOT_MINUTES;

/// Lesson length options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DurationType {
    Thirty,
    Sixty,
}

impl DurationType {
    pub fn minutes(&self) -> i64 {
        match self {
            DurationType::Thirty => 30,
            DurationType::Sixty => 60,
        }
    }

    /// Number of 30-minute slot units this duration consumes.
    pub fn slot_count(&self) -> usize {
        (self.minutes() / SLOT_MINUTES) as usize
    }

    pub fn from_minutes(minutes: i64) -> Option<Self> {
        match minutes {
            30 => Some(DurationType::Thirty),
            60 => Some(DurationType::Sixty),
            _ => None,
        }
    }
}

/// Booking is all-or-nothing, so a lesson is confirmed from the moment it
/// exists; there is no pending state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    Confirmed,
}

impl LessonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Confirmed => "CONFIRMED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CONFIRMED" => Some(LessonStatus::Confirmed),
            _ => None,
        }
    }
}

/// A confirmed booking consuming one or two contiguous slots of one tutor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: DurationType,
    pub status: LessonStatus,
    pub created_at: DateTime<Utc>,
}

/// Store-input form of a lesson; the store assigns id and creation time at
/// commit.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLesson {
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: DurationType,
    pub status: LessonStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookLessonRequest {
    pub tutor_id: Uuid,
    pub student_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration: DurationType,
    #[serde(default)]
    pub allow_alternative_tutor: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonResponse {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration: DurationType,
    pub status: LessonStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            tutor_id: lesson.tutor_id,
            start_time: lesson.start_time,
            end_time: lesson.end_time,
            duration: lesson.duration,
            status: lesson.status,
            created_at: lesson.created_at,
        }
    }
}
