//! Mock [`SlotStore`] for exercising failure paths that the in-memory
//! store cannot produce, such as storage errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use tutorsync_core::models::lesson::{Lesson, NewLesson};
use tutorsync_core::models::slot::Slot;
use tutorsync_core::store::{BookingCommit, SlotStore};

mock! {
    pub SlotStore {}

    #[async_trait]
    impl SlotStore for SlotStore {
        async fn insert_slot(
            &self,
            tutor_id: Uuid,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<Slot>;

        async fn slot_exists(&self, tutor_id: Uuid, start_time: DateTime<Utc>) -> eyre::Result<bool>;

        async fn find_slot(&self, id: Uuid) -> eyre::Result<Option<Slot>>;

        async fn delete_slot(&self, id: Uuid) -> eyre::Result<()>;

        async fn slots_by_tutor(&self, tutor_id: Uuid) -> eyre::Result<Vec<Slot>>;

        async fn unbooked_exists_at(&self, start_time: DateTime<Utc>) -> eyre::Result<bool>;

        async fn unbooked_in_range(
            &self,
            tutor_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> eyre::Result<Vec<Slot>>;

        async fn unbooked_excluding_tutor(
            &self,
            tutor_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> eyre::Result<Vec<Slot>>;

        async fn unbooked_between(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> eyre::Result<Vec<Slot>>;

        async fn commit_booking(
            &self,
            lesson: NewLesson,
            slot_ids: Vec<Uuid>,
        ) -> eyre::Result<BookingCommit>;

        async fn lessons_by_student(&self, student_id: Uuid) -> eyre::Result<Vec<Lesson>>;
    }
}
