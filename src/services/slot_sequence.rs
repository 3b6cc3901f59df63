//! Canonical slot ordering and consecutive-slot lookup.
//!
//! The slot catalog stores one row per day per slot, so "first lesson"
//! appears five times with the same name and times. Display and
//! double-lesson logic work on the deduplicated sequence instead.

use std::collections::HashSet;

use crate::api::{ClassWithTimeSlot, TimeSlot, WallTime};

/// Collapse per-day slot rows into one row per (start, end, name) and
/// sort by start time.
///
/// First occurrence wins on duplicates; the sort is stable, so rows
/// sharing a start time keep their input order.
pub fn canonical_slot_sequence(slots: &[TimeSlot]) -> Vec<TimeSlot> {
    let mut seen: HashSet<(WallTime, WallTime, String)> = HashSet::new();
    let mut sequence: Vec<TimeSlot> = slots
        .iter()
        .filter(|slot| {
            seen.insert((slot.start_time, slot.end_time, slot.name.clone()))
        })
        .cloned()
        .collect();
    sequence.sort_by_key(|slot| slot.start_time);
    sequence
}

/// The slot following `current` in the canonical sequence.
///
/// Matching is by start, end and name, not slot id, so any day's row
/// finds its successor. Returns None when `current` is the last slot or
/// does not appear in `slots` at all.
pub fn next_consecutive_slot(current: &TimeSlot, slots: &[TimeSlot]) -> Option<TimeSlot> {
    let sequence = canonical_slot_sequence(slots);
    let position = sequence.iter().position(|slot| {
        slot.start_time == current.start_time
            && slot.end_time == current.end_time
            && slot.name == current.name
    })?;
    sequence.get(position + 1).cloned()
}

/// Wall-clock range a class occupies.
///
/// A double lesson runs through the end of the next consecutive slot.
/// When no next slot exists the class falls back to its own slot's end,
/// without reporting the inconsistency.
pub fn class_time_range(class: &ClassWithTimeSlot, slots: &[TimeSlot]) -> (WallTime, WallTime) {
    let start = class.time_slot.start_time;
    let mut end = class.time_slot.end_time;
    if class.class.is_double {
        if let Some(next) = next_consecutive_slot(&class.time_slot, slots) {
            end = next.end_time;
        }
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::{canonical_slot_sequence, class_time_range, next_consecutive_slot};
    use crate::api::{
        Class, ClassId, ClassWithTimeSlot, DayOfWeek, Grade, Scope, TimeSlot, TimeSlotId, WallTime,
    };

    fn slot(id: &str, name: &str, day: DayOfWeek, start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            TimeSlotId::new(id),
            name,
            day,
            WallTime::parse(start).unwrap(),
            WallTime::parse(end).unwrap(),
        )
    }

    /// The catalog shape: the same named rows repeated on two days.
    fn two_day_catalog() -> Vec<TimeSlot> {
        vec![
            slot("sun-1", "שיעור ראשון", DayOfWeek::Sunday, "09:15", "09:50"),
            slot("sun-2", "הפסקה", DayOfWeek::Sunday, "09:50", "10:05"),
            slot("sun-3", "שיעור שני", DayOfWeek::Sunday, "10:05", "10:40"),
            slot("mon-1", "שיעור ראשון", DayOfWeek::Monday, "09:15", "09:50"),
            slot("mon-2", "הפסקה", DayOfWeek::Monday, "09:50", "10:05"),
            slot("mon-3", "שיעור שני", DayOfWeek::Monday, "10:05", "10:40"),
        ]
    }

    fn double_class(on: &TimeSlot, is_double: bool) -> ClassWithTimeSlot {
        let class = Class::new(
            ClassId::new("c1"),
            "Carpentry",
            "",
            "",
            on.id.clone(),
            vec![Grade::new(4)],
            false,
            is_double,
            "",
            Scope::Prod,
        );
        ClassWithTimeSlot::new(class, on.clone())
    }

    #[test]
    fn test_canonical_sequence_dedups_across_days() {
        let sequence = canonical_slot_sequence(&two_day_catalog());

        assert_eq!(sequence.len(), 3);
        let names: Vec<&str> = sequence.iter().map(|slot| slot.name.as_str()).collect();
        assert_eq!(names, vec!["שיעור ראשון", "הפסקה", "שיעור שני"]);
        // First occurrence wins: the Sunday rows survive.
        assert_eq!(sequence[0].id, TimeSlotId::new("sun-1"));
    }

    #[test]
    fn test_canonical_sequence_sorts_by_start_time() {
        let mut shuffled = two_day_catalog();
        shuffled.reverse();

        let sequence = canonical_slot_sequence(&shuffled);
        let starts: Vec<String> = sequence
            .iter()
            .map(|slot| slot.start_time.to_string())
            .collect();
        assert_eq!(starts, vec!["09:15", "09:50", "10:05"]);
    }

    #[test]
    fn test_same_times_different_names_both_kept() {
        let slots = vec![
            slot("s1", "שיעור ראשון", DayOfWeek::Sunday, "09:15", "09:50"),
            slot("s2", "מפגש בוקר", DayOfWeek::Sunday, "09:15", "09:50"),
        ];

        let sequence = canonical_slot_sequence(&slots);
        assert_eq!(sequence.len(), 2);
        // Stable sort keeps input order between equal starts.
        assert_eq!(sequence[0].name, "שיעור ראשון");
        assert_eq!(sequence[1].name, "מפגש בוקר");
    }

    #[test]
    fn test_next_consecutive_slot_found() {
        let catalog = two_day_catalog();
        // The Monday row finds its successor through the canonical
        // sequence even though that sequence holds Sunday rows.
        let current = &catalog[3];

        let next = next_consecutive_slot(current, &catalog).unwrap();
        assert_eq!(next.name, "הפסקה");
        assert_eq!(next.start_time, WallTime::parse("09:50").unwrap());
    }

    #[test]
    fn test_next_consecutive_slot_after_last_is_none() {
        let catalog = two_day_catalog();
        let last = &catalog[2];

        assert!(next_consecutive_slot(last, &catalog).is_none());
    }

    #[test]
    fn test_next_slot_resolves_across_a_gap() {
        // The sequence is chronological, not contiguous: a gap before the
        // next slot does not break the succession.
        let slots = vec![
            slot("s1", "שיעור ראשון", DayOfWeek::Sunday, "09:15", "09:50"),
            slot("s2", "שיעור שני", DayOfWeek::Sunday, "09:50", "10:30"),
            slot("s3", "שיעור שלישי", DayOfWeek::Sunday, "11:00", "11:40"),
        ];

        let next = next_consecutive_slot(&slots[1], &slots).unwrap();
        assert_eq!(next.name, "שיעור שלישי");
        assert_eq!(next.start_time, WallTime::parse("11:00").unwrap());
    }

    #[test]
    fn test_next_consecutive_slot_unknown_slot_is_none() {
        let catalog = two_day_catalog();
        let foreign = slot("x", "שיעור שלישי", DayOfWeek::Sunday, "11:00", "11:35");

        assert!(next_consecutive_slot(&foreign, &catalog).is_none());
    }

    #[test]
    fn test_class_time_range_single() {
        let catalog = two_day_catalog();
        let class = double_class(&catalog[0], false);

        let (start, end) = class_time_range(&class, &catalog);
        assert_eq!(start, WallTime::parse("09:15").unwrap());
        assert_eq!(end, WallTime::parse("09:50").unwrap());
    }

    #[test]
    fn test_class_time_range_double_extends_to_next_end() {
        let catalog = two_day_catalog();
        let class = double_class(&catalog[0], true);

        let (start, end) = class_time_range(&class, &catalog);
        assert_eq!(start, WallTime::parse("09:15").unwrap());
        // Runs through the break that follows the first lesson.
        assert_eq!(end, WallTime::parse("10:05").unwrap());
    }

    #[test]
    fn test_class_time_range_double_on_last_slot_falls_back() {
        let catalog = two_day_catalog();
        let class = double_class(&catalog[2], true);

        let (start, end) = class_time_range(&class, &catalog);
        assert_eq!(start, WallTime::parse("10:05").unwrap());
        assert_eq!(end, WallTime::parse("10:40").unwrap());
    }

    #[test]
    fn test_empty_catalog() {
        assert!(canonical_slot_sequence(&[]).is_empty());

        let lone = slot("s1", "שיעור ראשון", DayOfWeek::Sunday, "09:15", "09:50");
        assert!(next_consecutive_slot(&lone, &[]).is_none());

        let class = double_class(&lone, true);
        let (start, end) = class_time_range(&class, &[]);
        assert_eq!(start, WallTime::parse("09:15").unwrap());
        assert_eq!(end, WallTime::parse("09:50").unwrap());
    }
}
