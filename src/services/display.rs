//! Hebrew display labels for days, grades and time ranges.
//!
//! All output here is plain text handed to an RTL renderer. Time ranges
//! are therefore emitted end-first, so the rendered line reads
//! start-to-end right to left.

use crate::api::{ClassWithTimeSlot, DayOfWeek, Grade, TimeSlot};
use crate::services::slot_sequence::class_time_range;

/// Grade letters for grades 1..=8, א through ח.
pub const GRADE_LETTERS: [&str; 8] = ["א", "ב", "ג", "ד", "ה", "ו", "ז", "ח"];

const DAY_NAMES: [&str; 7] = [
    "ראשון", "שני", "שלישי", "רביעי", "חמישי", "שישי", "שבת",
];

/// Truncate "HH:MM:SS" to "HH:MM"; shorter input passes through.
pub fn normalize_hhmm(raw: &str) -> &str {
    raw.get(..5).unwrap_or(raw)
}

/// Render a time range, end before start, in HH:MM.
///
/// An empty start or end degrades to the other endpoint alone; both
/// empty yields the empty string.
pub fn format_time_range(start: &str, end: &str) -> String {
    let start = normalize_hhmm(start);
    let end = normalize_hhmm(end);
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (true, false) => end.to_string(),
        (false, true) => start.to_string(),
        (false, false) => format!("{} - {}", end, start),
    }
}

/// Hebrew name of a weekday.
pub fn day_name(day: DayOfWeek) -> &'static str {
    DAY_NAMES[day.index() as usize]
}

fn grade_letter(grade: Grade) -> Option<&'static str> {
    let index = grade.value().checked_sub(1)? as usize;
    GRADE_LETTERS.get(index).copied()
}

/// "כיתה ב'" for grade 2; grades past ח keep the bare number.
pub fn grade_name(grade: Grade) -> String {
    match grade_letter(grade) {
        Some(letter) => format!("כיתה {}'", letter),
        None => format!("כיתה {}", grade.value()),
    }
}

/// "ב'" for grade 2; grades past ח keep the bare number.
pub fn grade_name_short(grade: Grade) -> String {
    match grade_letter(grade) {
        Some(letter) => format!("{}'", letter),
        None => grade.value().to_string(),
    }
}

/// Display range of a single slot.
pub fn slot_time_range(slot: &TimeSlot) -> String {
    format_time_range(&slot.start_time.hhmm(), &slot.end_time.hhmm())
}

/// Display range of a class, extended through the next slot for double
/// lessons.
pub fn class_time_range_label(class: &ClassWithTimeSlot, slots: &[TimeSlot]) -> String {
    let (start, end) = class_time_range(class, slots);
    format_time_range(&start.hhmm(), &end.hhmm())
}
