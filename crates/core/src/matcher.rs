//! Pure slot-matching decisions for the booking path.
//!
//! Both functions operate on candidate lists already fetched under the
//! booking lock: [`is_directly_satisfied`] on the requested tutor's own
//! unbooked slots in the window, [`find_alternative_group`] on the unbooked
//! slots of every other tutor in the same window.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::lesson::DurationType;
use crate::models::slot::Slot;
use crate::quantize::SLOT_MINUTES;

/// Whether the requested tutor's own slots satisfy the request.
///
/// A 30-minute request needs exactly one slot starting at the requested
/// time. A 60-minute request needs the consecutive pair starting at the
/// requested time and 30 minutes later.
pub fn is_directly_satisfied(
    slots: &[Slot],
    requested_start: DateTime<Utc>,
    duration: DurationType,
) -> bool {
    match duration {
        DurationType::Thirty => slots.len() == 1 && slots[0].start_time == requested_start,
        DurationType::Sixty => {
            let second_start = requested_start + Duration::minutes(SLOT_MINUTES);
            slots.len() >= 2
                && slots.iter().any(|s| s.start_time == requested_start)
                && slots.iter().any(|s| s.start_time == second_start)
        }
    }
}

/// Select a substitute tutor's slot group for the request, or an empty vec
/// when no candidate tutor can cover it.
///
/// Ties break to the first tutor encountered in the candidate list's order.
/// That is the whole fairness policy; there is no weighting on top.
pub fn find_alternative_group(
    candidates: &[Slot],
    duration: DurationType,
    requested_start: DateTime<Utc>,
) -> Vec<Slot> {
    match duration {
        DurationType::Thirty => candidates
            .iter()
            .find(|s| s.start_time == requested_start)
            .cloned()
            .map(|slot| vec![slot])
            .unwrap_or_default(),
        DurationType::Sixty => {
            let second_start = requested_start + Duration::minutes(SLOT_MINUTES);

            // Group by tutor, preserving the order tutors first appear in
            // the candidate list.
            let mut tutor_order: Vec<Uuid> = Vec::new();
            let mut by_tutor: HashMap<Uuid, Vec<&Slot>> = HashMap::new();
            for slot in candidates {
                if !by_tutor.contains_key(&slot.tutor_id) {
                    tutor_order.push(slot.tutor_id);
                }
                by_tutor.entry(slot.tutor_id).or_default().push(slot);
            }

            for tutor_id in tutor_order {
                let slots = &by_tutor[&tutor_id];
                let first = slots.iter().find(|s| s.start_time == requested_start);
                let second = slots.iter().find(|s| s.start_time == second_start);
                if let (Some(first), Some(second)) = (first, second) {
                    return vec![(*first).clone(), (*second).clone()];
                }
            }
            Vec::new()
        }
    }
}
