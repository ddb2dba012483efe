//! Postgres-backed [`SlotStore`], adapting the repository functions to the
//! engine's storage capability trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use tutorsync_core::models::lesson::{Lesson, NewLesson};
use tutorsync_core::models::slot::Slot;
use tutorsync_core::store::{BookingCommit, SlotStore};

use crate::repositories;
use crate::DbPool;

#[derive(Clone)]
pub struct PgSlotStore {
    pool: DbPool,
}

impl PgSlotStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SlotStore for PgSlotStore {
    async fn insert_slot(
        &self,
        tutor_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Slot> {
        let slot =
            repositories::slot::create_slot(&self.pool, tutor_id, start_time, end_time).await?;
        Ok(slot.into())
    }

    async fn slot_exists(&self, tutor_id: Uuid, start_time: DateTime<Utc>) -> Result<bool> {
        repositories::slot::exists_by_tutor_and_start(&self.pool, tutor_id, start_time).await
    }

    async fn find_slot(&self, id: Uuid) -> Result<Option<Slot>> {
        let slot = repositories::slot::get_slot_by_id(&self.pool, id).await?;
        Ok(slot.map(Into::into))
    }

    async fn delete_slot(&self, id: Uuid) -> Result<()> {
        repositories::slot::delete_slot(&self.pool, id).await
    }

    async fn slots_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Slot>> {
        let slots = repositories::slot::get_slots_by_tutor(&self.pool, tutor_id).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn unbooked_exists_at(&self, start_time: DateTime<Utc>) -> Result<bool> {
        repositories::slot::exists_unbooked_at(&self.pool, start_time).await
    }

    async fn unbooked_in_range(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots =
            repositories::slot::get_unbooked_in_range(&self.pool, tutor_id, start, end).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn unbooked_excluding_tutor(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots =
            repositories::slot::get_unbooked_excluding_tutor(&self.pool, tutor_id, start, end)
                .await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn unbooked_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots = repositories::slot::get_unbooked_between(&self.pool, start, end).await?;
        Ok(slots.into_iter().map(Into::into).collect())
    }

    async fn commit_booking(
        &self,
        lesson: NewLesson,
        slot_ids: Vec<Uuid>,
    ) -> Result<BookingCommit> {
        match repositories::lesson::create_lesson_booking(&self.pool, &lesson, &slot_ids).await? {
            Some(db_lesson) => Ok(BookingCommit::Committed(db_lesson.try_into()?)),
            None => Ok(BookingCommit::Conflict),
        }
    }

    async fn lessons_by_student(&self, student_id: Uuid) -> Result<Vec<Lesson>> {
        let lessons = repositories::lesson::get_lessons_by_student(&self.pool, student_id).await?;
        lessons.into_iter().map(TryInto::try_into).collect()
    }
}
