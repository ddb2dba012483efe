use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::lesson::{Lesson, NewLesson};
use crate::models::slot::Slot;

pub mod memory;

/// Outcome of the atomic booking commit.
#[derive(Debug)]
pub enum BookingCommit {
    Committed(Lesson),
    /// A slot in the consumption set was already booked or gone by write
    /// time; nothing was persisted.
    Conflict,
}

/// Transactional storage of slots and lessons.
///
/// Every query that feeds a booking decision runs inside the booking lock;
/// the availability read path calls the same queries unlocked and accepts
/// the staleness window. Range queries return slots ordered by start time.
#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn insert_slot(
        &self,
        tutor_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Slot>;

    /// Whether the tutor already has a slot at this start time, booked or
    /// not.
    async fn slot_exists(&self, tutor_id: Uuid, start_time: DateTime<Utc>) -> Result<bool>;

    async fn find_slot(&self, id: Uuid) -> Result<Option<Slot>>;

    /// Unconditional removal; the caller enforces ownership and the
    /// unbooked rule first.
    async fn delete_slot(&self, id: Uuid) -> Result<()>;

    /// All of a tutor's slots, ascending by start time.
    async fn slots_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Slot>>;

    /// Whether any tutor has an unbooked slot at exactly this start time.
    async fn unbooked_exists_at(&self, start_time: DateTime<Utc>) -> Result<bool>;

    /// The tutor's unbooked slots lying fully inside `[start, end]`.
    async fn unbooked_in_range(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>>;

    /// Unbooked slots of every tutor except `tutor_id` lying fully inside
    /// `[start, end]`, the alternative-tutor candidate set.
    async fn unbooked_excluding_tutor(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>>;

    /// Unbooked slots of all tutors starting inside `[start, end]`.
    async fn unbooked_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>>;

    /// Atomically insert the lesson and flip every listed slot to booked.
    ///
    /// Each flip is conditional on `booked = false` at write time. If any
    /// slot fails the condition (consumed by a concurrent booking outside
    /// this lock key, or deleted), the whole commit aborts and reports
    /// [`BookingCommit::Conflict`].
    async fn commit_booking(
        &self,
        lesson: NewLesson,
        slot_ids: Vec<Uuid>,
    ) -> Result<BookingCommit>;

    /// The student's lessons, newest start time first.
    async fn lessons_by_student(&self, student_id: Uuid) -> Result<Vec<Lesson>>;
}
