//! # Booking Transaction
//!
//! The single write path that consumes slots. A booking serializes against
//! other bookings of the same (tutor, start time) key through the lock
//! coordinator, validates the request against store content inside the
//! critical section, and commits the lesson together with the slot flips as
//! one atomic store write.
//!
//! The lock key is deliberately narrow, so unrelated (tutor, time) pairs
//! never contend. The alternative-tutor path reads other tutors' slots
//! outside their own lock keys, so two alternative-seeking bookings can
//! select the same substitute pair concurrently; the store's conditional
//! commit (`booked = false` checked at write time) fails the loser, which
//! surfaces as no availability.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use uuid::Uuid;

use tutorsync_lock::LockCoordinator;

use crate::errors::{BookingError, BookingResult};
use crate::matcher;
use crate::models::lesson::{BookLessonRequest, Lesson, LessonStatus, NewLesson};
use crate::store::{BookingCommit, SlotStore};

/// How long a booking waits for its lock before giving up.
pub const LOCK_WAIT: StdDuration = StdDuration::from_secs(3);
/// Upper bound on holding the lock, covering a crashed or stalled holder.
pub const LOCK_LEASE: StdDuration = StdDuration::from_secs(5);

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn SlotStore>,
    locks: Arc<dyn LockCoordinator>,
}

impl BookingService {
    pub fn new(store: Arc<dyn SlotStore>, locks: Arc<dyn LockCoordinator>) -> Self {
        Self { store, locks }
    }

    /// Book a lesson against the requested tutor, or a substitute when the
    /// request allows one. Exactly one of N concurrent attempts on the same
    /// (tutor, start time) can succeed; losers observe consumed slots or
    /// time out on the lock.
    pub async fn book(&self, request: BookLessonRequest) -> BookingResult<Lesson> {
        let key = booking_lock_key(request.tutor_id, request.start_time);

        let guard = self
            .locks
            .acquire(&key, LOCK_WAIT, LOCK_LEASE)
            .await
            .map_err(|err| {
                tracing::debug!(key, %err, "booking lock not acquired");
                BookingError::LockContended
            })?;

        let outcome = self.book_under_lock(&request).await;
        drop(guard);
        outcome
    }

    async fn book_under_lock(&self, request: &BookLessonRequest) -> BookingResult<Lesson> {
        let start = request.start_time;
        let end = start + Duration::minutes(request.duration.minutes());

        let own_slots = self
            .store
            .unbooked_in_range(request.tutor_id, start, end)
            .await?;

        let (consumed, tutor_id) =
            if matcher::is_directly_satisfied(&own_slots, start, request.duration) {
                (own_slots, request.tutor_id)
            } else if request.allow_alternative_tutor {
                let candidates = self
                    .store
                    .unbooked_excluding_tutor(request.tutor_id, start, end)
                    .await?;
                let group = matcher::find_alternative_group(&candidates, request.duration, start);
                match group.first() {
                    Some(first) => {
                        let substitute = first.tutor_id;
                        tracing::debug!(requested = %request.tutor_id, %substitute, "substituting alternative tutor");
                        (group, substitute)
                    }
                    None => return Err(BookingError::NoAvailableTutor),
                }
            } else {
                return Err(BookingError::NoAvailableTutor);
            };

        let lesson = NewLesson {
            student_id: request.student_id,
            tutor_id,
            start_time: start,
            end_time: end,
            duration: request.duration,
            status: LessonStatus::Confirmed,
        };
        let slot_ids = consumed.iter().map(|s| s.id).collect();

        match self.store.commit_booking(lesson, slot_ids).await? {
            BookingCommit::Committed(lesson) => Ok(lesson),
            // A slot was consumed or deleted between our read and the
            // conditional write; same outcome as never having found it.
            BookingCommit::Conflict => Err(BookingError::NoAvailableTutor),
        }
    }

    /// The student's booked lessons, newest start time first.
    pub async fn lessons_for_student(&self, student_id: Uuid) -> BookingResult<Vec<Lesson>> {
        Ok(self.store.lessons_by_student(student_id).await?)
    }
}

/// One lock per (tutor, start time); minute precision matches slot
/// alignment.
fn booking_lock_key(tutor_id: Uuid, start_time: DateTime<Utc>) -> String {
    format!(
        "lesson:{}:{}",
        tutor_id,
        start_time.format("%Y-%m-%dT%H:%M")
    )
}
