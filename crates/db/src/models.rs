use chrono::{DateTime, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use tutorsync_core::models::lesson::{DurationType, Lesson, LessonStatus};
use tutorsync_core::models::slot::Slot;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSlot {
    pub id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub booked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbSlot> for Slot {
    fn from(slot: DbSlot) -> Self {
        Self {
            id: slot.id,
            tutor_id: slot.tutor_id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            booked: slot.booked,
            created_at: slot.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbLesson {
    pub id: Uuid,
    pub student_id: Uuid,
    pub tutor_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_minutes: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbLesson> for Lesson {
    type Error = eyre::Report;

    fn try_from(lesson: DbLesson) -> Result<Self, Self::Error> {
        let duration = DurationType::from_minutes(i64::from(lesson.duration_minutes))
            .ok_or_else(|| eyre!("unexpected lesson duration: {} minutes", lesson.duration_minutes))?;
        let status = LessonStatus::parse(&lesson.status)
            .ok_or_else(|| eyre!("unexpected lesson status: {}", lesson.status))?;

        Ok(Self {
            id: lesson.id,
            student_id: lesson.student_id,
            tutor_id: lesson.tutor_id,
            start_time: lesson.start_time,
            end_time: lesson.end_time,
            duration,
            status,
            created_at: lesson.created_at,
        })
    }
}
