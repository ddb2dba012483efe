//! Tutor-facing slot management: registering availability ahead of time and
//! deleting slots that have not been consumed.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{BookingError, BookingResult};
use crate::models::lesson::DurationType;
use crate::models::slot::Slot;
use crate::quantize::{SLOT_MINUTES, is_slot_aligned};
use crate::store::SlotStore;

#[derive(Clone)]
pub struct SlotService {
    store: Arc<dyn SlotStore>,
    clock: Arc<dyn Clock>,
}

impl SlotService {
    pub fn new(store: Arc<dyn SlotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Register availability starting at `start_time`, split into 30-minute
    /// units. Units the tutor already has on the calendar are skipped, so
    /// repeating a registration is harmless. Returns only the units
    /// actually created.
    pub async fn register(
        &self,
        tutor_id: Uuid,
        start_time: DateTime<Utc>,
        duration: DurationType,
    ) -> BookingResult<Vec<Slot>> {
        if start_time < self.clock.now() {
            return Err(BookingError::StartTimePassed);
        }
        if !is_slot_aligned(start_time) {
            return Err(BookingError::InvalidStartTime);
        }

        let mut created = Vec::new();
        for unit in 0..duration.slot_count() {
            let slot_start = start_time + Duration::minutes(SLOT_MINUTES * unit as i64);
            let slot_end = slot_start + Duration::minutes(SLOT_MINUTES);

            if self.store.slot_exists(tutor_id, slot_start).await? {
                tracing::debug!(%tutor_id, %slot_start, "slot already registered, skipping");
                continue;
            }
            created.push(self.store.insert_slot(tutor_id, slot_start, slot_end).await?);
        }

        Ok(created)
    }

    /// Delete an unbooked slot. Only the owning tutor may delete, and a
    /// consumed slot stays on the calendar.
    pub async fn delete(&self, slot_id: Uuid, tutor_id: Uuid) -> BookingResult<()> {
        let slot = self
            .store
            .find_slot(slot_id)
            .await?
            .ok_or(BookingError::SlotNotFound)?;

        if slot.tutor_id != tutor_id {
            return Err(BookingError::NotSlotOwner);
        }
        if slot.booked {
            return Err(BookingError::AlreadyBooked);
        }

        self.store.delete_slot(slot_id).await?;
        Ok(())
    }

    /// Everything the tutor has registered, ascending by start time.
    pub async fn slots_for_tutor(&self, tutor_id: Uuid) -> BookingResult<Vec<Slot>> {
        Ok(self.store.slots_by_tutor(tutor_id).await?)
    }
}
