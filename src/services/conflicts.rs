//! Conflict detection between selections and a candidate class.

use crate::api::{Class, ClassWithTimeSlot, ScheduleSelection};

/// Find every selected class occupying the candidate's day and exact time
/// slot.
///
/// Conflict means identical slot id on the same day. Two classes in
/// different slots whose wall-clock ranges happen to overlap are not
/// conflicting; the fixed slot catalog makes slot identity the boundary.
/// A selection referencing the candidate's own class id is never reported.
///
/// Returned classes keep the input selection order; all conflicts are
/// returned, not just the first.
pub fn conflicting_classes(
    selections: &[ScheduleSelection],
    candidate: &ClassWithTimeSlot,
) -> Vec<Class> {
    selections
        .iter()
        .filter(|selection| {
            let selected = &selection.class;
            selected.day() == candidate.day()
                && selected.class.time_slot_id == candidate.class.time_slot_id
                && selected.class.id != candidate.class.id
        })
        .map(|selection| selection.class.class.clone())
        .collect()
}

/// True iff selecting the candidate would double-book a day+slot cell.
pub fn has_time_conflict(selections: &[ScheduleSelection], candidate: &ClassWithTimeSlot) -> bool {
    !conflicting_classes(selections, candidate).is_empty()
}
