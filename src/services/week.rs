//! One-call week view assembly over any store.

use futures::try_join;
use log::info;
use serde::{Deserialize, Serialize};

use crate::api::{TimeSlot, WeeklySchedule};
use crate::services::weekly_grid::build_weekly_schedule;
use crate::store::{ScheduleStore, StoreResult};

/// Everything the timetable screen needs from one fetch: the derived
/// grid plus the raw slot list the display helpers work from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekView {
    pub grid: WeeklySchedule,
    pub time_slots: Vec<TimeSlot>,
}

/// Fetch classes and time slots concurrently and build the weekly grid.
///
/// # Arguments
/// * `store` - Store implementation
///
/// # Returns
/// * `Ok(WeekView)` - Grid and slot list
/// * `Err` if either fetch fails; no partial view is built
pub async fn load_week_view<S: ScheduleStore>(store: &S) -> StoreResult<WeekView> {
    let (classes, time_slots) = try_join!(store.get_classes(), store.get_time_slots())?;
    info!(
        "Service layer: building week view from {} classes and {} time slots",
        classes.len(),
        time_slots.len()
    );
    Ok(WeekView {
        grid: build_weekly_schedule(&classes),
        time_slots,
    })
}
