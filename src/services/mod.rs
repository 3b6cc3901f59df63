//! Service layer for schedule derivation and selection state.
//!
//! The pure functions here (grid building, conflict detection, slot
//! sequencing, display labels) never touch the store; all fallible async
//! work lives in [`selections`] and [`week`], the seam between store I/O
//! and deterministic logic.

pub mod conflicts;
pub mod display;
pub mod selections;
pub mod slot_sequence;
pub mod week;
pub mod weekly_grid;


pub use conflicts::{conflicting_classes, has_time_conflict};
pub use display::{
    class_time_range_label, day_name, format_time_range, grade_name, grade_name_short,
    normalize_hhmm, slot_time_range,
};
pub use selections::{LoadPhase, OwnerSelections, SelectionTracker};
pub use slot_sequence::{canonical_slot_sequence, class_time_range, next_consecutive_slot};
pub use week::{load_week_view, WeekView};
pub use weekly_grid::{build_weekly_schedule, filter_classes_for_grade};
