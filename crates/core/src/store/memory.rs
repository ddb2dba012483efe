//! In-memory [`SlotStore`] with the same atomicity contract as the
//! database-backed store. Backs the engine's own tests and the API test
//! harness; not intended for production deployments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::models::lesson::{Lesson, NewLesson};
use crate::models::slot::Slot;
use crate::store::{BookingCommit, SlotStore};

#[derive(Default)]
pub struct InMemorySlotStore {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    slots: Vec<Slot>,
    lessons: Vec<Lesson>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn ordered(mut slots: Vec<Slot>) -> Vec<Slot> {
    // Stable sort keeps insertion order among equal start times, which is
    // what "first tutor encountered" tie-breaking leans on.
    slots.sort_by_key(|s| s.start_time);
    slots
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn insert_slot(
        &self,
        tutor_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<Slot> {
        let slot = Slot {
            id: Uuid::new_v4(),
            tutor_id,
            start_time,
            end_time,
            booked: false,
            created_at: Utc::now(),
        };
        self.state().slots.push(slot.clone());
        Ok(slot)
    }

    async fn slot_exists(&self, tutor_id: Uuid, start_time: DateTime<Utc>) -> Result<bool> {
        Ok(self
            .state()
            .slots
            .iter()
            .any(|s| s.tutor_id == tutor_id && s.start_time == start_time))
    }

    async fn find_slot(&self, id: Uuid) -> Result<Option<Slot>> {
        Ok(self.state().slots.iter().find(|s| s.id == id).cloned())
    }

    async fn delete_slot(&self, id: Uuid) -> Result<()> {
        self.state().slots.retain(|s| s.id != id);
        Ok(())
    }

    async fn slots_by_tutor(&self, tutor_id: Uuid) -> Result<Vec<Slot>> {
        let slots = self
            .state()
            .slots
            .iter()
            .filter(|s| s.tutor_id == tutor_id)
            .cloned()
            .collect();
        Ok(ordered(slots))
    }

    async fn unbooked_exists_at(&self, start_time: DateTime<Utc>) -> Result<bool> {
        Ok(self
            .state()
            .slots
            .iter()
            .any(|s| !s.booked && s.start_time == start_time))
    }

    async fn unbooked_in_range(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots = self
            .state()
            .slots
            .iter()
            .filter(|s| {
                s.tutor_id == tutor_id && !s.booked && s.start_time >= start && s.end_time <= end
            })
            .cloned()
            .collect();
        Ok(ordered(slots))
    }

    async fn unbooked_excluding_tutor(
        &self,
        tutor_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots = self
            .state()
            .slots
            .iter()
            .filter(|s| {
                s.tutor_id != tutor_id && !s.booked && s.start_time >= start && s.end_time <= end
            })
            .cloned()
            .collect();
        Ok(ordered(slots))
    }

    async fn unbooked_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let slots = self
            .state()
            .slots
            .iter()
            .filter(|s| !s.booked && s.start_time >= start && s.start_time <= end)
            .cloned()
            .collect();
        Ok(ordered(slots))
    }

    async fn commit_booking(
        &self,
        lesson: NewLesson,
        slot_ids: Vec<Uuid>,
    ) -> Result<BookingCommit> {
        let mut state = self.state();

        // Conditional write: every slot must still exist and be unbooked at
        // commit time. One mutex over the whole store makes the check and
        // the flips a single atomic step.
        for id in &slot_ids {
            match state.slots.iter().find(|s| s.id == *id) {
                Some(slot) if !slot.booked => {}
                _ => return Ok(BookingCommit::Conflict),
            }
        }
        for id in &slot_ids {
            if let Some(slot) = state.slots.iter_mut().find(|s| s.id == *id) {
                slot.booked = true;
            }
        }

        let lesson = Lesson {
            id: Uuid::new_v4(),
            student_id: lesson.student_id,
            tutor_id: lesson.tutor_id,
            start_time: lesson.start_time,
            end_time: lesson.end_time,
            duration: lesson.duration,
            status: lesson.status,
            created_at: Utc::now(),
        };
        state.lessons.push(lesson.clone());
        Ok(BookingCommit::Committed(lesson))
    }

    async fn lessons_by_student(&self, student_id: Uuid) -> Result<Vec<Lesson>> {
        let mut lessons: Vec<Lesson> = self
            .state()
            .lessons
            .iter()
            .filter(|l| l.student_id == student_id)
            .cloned()
            .collect();
        lessons.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(lessons)
    }
}
