//! # Availability Queries
//!
//! The unlocked read path: what times are bookable on a date, and which
//! tutors are open. Both operations are computed fresh from store content
//! at call time; a booking that commits between the read and the response
//! only makes a listing optimistic, never a booking wrong, because the
//! booking path re-validates everything under its lock.
//!
//! ## Day scan
//!
//! A listing walks 30-minute boundaries from a start-of-search instant to
//! 23:59 of the target date. For today the scan starts at the next boundary
//! strictly after the current time (14:10 scans from 14:30, 14:35 from
//! 15:00); for a future date it starts at midnight. A 60-minute request
//! marks a boundary open only when both it and the following boundary have
//! an unbooked slot, not necessarily from the same tutor, since tutor
//! binding happens at booking time.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::{BookingError, BookingResult};
use crate::models::availability::{TimeSlotEntry, TutorSlots};
use crate::models::lesson::DurationType;
use crate::quantize::{SLOT_MINUTES, day_end, day_start, next_slot_boundary, time_label};
use crate::store::SlotStore;

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn SlotStore>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn SlotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Open time-of-day entries for `date` and the requested lesson length.
    pub async fn open_slots_for_date(
        &self,
        date: NaiveDate,
        duration: DurationType,
    ) -> BookingResult<Vec<TimeSlotEntry>> {
        let now = self.clock.now();
        let today = now.date_naive();
        if date < today {
            return Err(BookingError::DateInPast);
        }

        let mut cursor = if date == today {
            next_slot_boundary(now)
        } else {
            day_start(date)
        };
        let end = day_end(date);

        let mut entries = Vec::new();
        while cursor < end {
            let available = match duration {
                DurationType::Thirty => self.store.unbooked_exists_at(cursor).await?,
                DurationType::Sixty => {
                    let next = cursor + Duration::minutes(SLOT_MINUTES);
                    self.store.unbooked_exists_at(cursor).await?
                        && self.store.unbooked_exists_at(next).await?
                }
            };

            if available {
                entries.push(TimeSlotEntry {
                    time: time_label(cursor),
                    available: true,
                });
            }

            cursor += Duration::minutes(SLOT_MINUTES);
        }

        Ok(entries)
    }

    /// Tutors with open slots on `date`, each with its chronological time
    /// labels. Tutors appear in the order the day's slot scan first meets
    /// them.
    pub async fn tutors_for_date(&self, date: NaiveDate) -> BookingResult<Vec<TutorSlots>> {
        let today = self.clock.now().date_naive();
        if date < today {
            return Err(BookingError::DateInPast);
        }

        let slots = self
            .store
            .unbooked_between(day_start(date), day_end(date))
            .await?;
        if slots.is_empty() {
            return Err(BookingError::NoAvailableTutor);
        }

        let mut tutor_order: Vec<Uuid> = Vec::new();
        let mut times: HashMap<Uuid, Vec<String>> = HashMap::new();
        for slot in &slots {
            if !times.contains_key(&slot.tutor_id) {
                tutor_order.push(slot.tutor_id);
            }
            times
                .entry(slot.tutor_id)
                .or_default()
                .push(time_label(slot.start_time));
        }

        Ok(tutor_order
            .into_iter()
            .map(|tutor_id| TutorSlots {
                tutor_id,
                available_times: times.remove(&tutor_id).unwrap_or_default(),
            })
            .collect())
    }
}
