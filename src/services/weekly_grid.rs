//! Weekly schedule builder.

use crate::api::{ClassWithTimeSlot, Grade, WeeklySchedule};

/// Build the day → time slot → classes grid from a flat class list.
///
/// Each class lands in the cell keyed by its slot's day and its own
/// `time_slot_id`; intermediate levels are created lazily. Ordering within
/// a cell is input order, so callers pre-sort when display needs it.
/// Pure and idempotent: equal inputs build structurally equal grids.
pub fn build_weekly_schedule(classes: &[ClassWithTimeSlot]) -> WeeklySchedule {
    let mut grid = WeeklySchedule::default();

    for class in classes {
        grid.days
            .entry(class.day())
            .or_default()
            .entry(class.class.time_slot_id.clone())
            .or_default()
            .push(class.clone());
    }

    grid
}

/// Keep only classes admitting the given grade.
///
/// Grade filtering is a presentation concern applied to the class list
/// before or after the grid is built; the builder itself never filters.
pub fn filter_classes_for_grade(
    classes: &[ClassWithTimeSlot],
    grade: Grade,
) -> Vec<ClassWithTimeSlot> {
    classes
        .iter()
        .filter(|class| class.class.admits_grade(grade))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{build_weekly_schedule, filter_classes_for_grade};
    use crate::api::{
        Class, ClassId, ClassWithTimeSlot, DayOfWeek, Grade, Scope, TimeSlot, TimeSlotId,
        WallTime, WeeklySchedule,
    };
    use proptest::prelude::*;

    fn slot(id: &str, day: DayOfWeek, start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(
            TimeSlotId::new(id),
            format!("slot {}", id),
            day,
            WallTime::parse(start).unwrap(),
            WallTime::parse(end).unwrap(),
        )
    }

    fn class_on(id: &str, slot: &TimeSlot, grades: &[u8]) -> ClassWithTimeSlot {
        let class = Class::new(
            ClassId::new(id),
            format!("Class {}", id),
            "",
            "",
            slot.id.clone(),
            grades.iter().copied().map(Grade::new).collect(),
            false,
            false,
            "",
            Scope::Prod,
        );
        ClassWithTimeSlot::new(class, slot.clone())
    }

    #[test]
    fn test_empty_input_builds_empty_grid() {
        let grid = build_weekly_schedule(&[]);
        assert_eq!(grid, WeeklySchedule::default());
        assert!(grid.days.is_empty());
    }

    #[test]
    fn test_every_class_lands_in_its_own_cell() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");
        let sun_2 = slot("sun-2", DayOfWeek::Sunday, "09:50", "10:30");
        let mon_1 = slot("mon-1", DayOfWeek::Monday, "09:15", "09:50");

        let classes = vec![
            class_on("a", &sun_1, &[2]),
            class_on("b", &sun_2, &[2]),
            class_on("c", &mon_1, &[3]),
        ];

        let grid = build_weekly_schedule(&classes);

        assert_eq!(grid.total_classes(), classes.len());
        assert_eq!(grid.classes_in(DayOfWeek::Sunday, &sun_1.id).len(), 1);
        assert_eq!(
            grid.classes_in(DayOfWeek::Sunday, &sun_1.id)[0].class.id,
            ClassId::new("a")
        );
        assert_eq!(grid.classes_in(DayOfWeek::Sunday, &sun_2.id).len(), 1);
        assert_eq!(grid.classes_in(DayOfWeek::Monday, &mon_1.id).len(), 1);
        // No leakage into cells nothing was scheduled in.
        assert!(grid.classes_in(DayOfWeek::Monday, &sun_1.id).is_empty());
        assert!(grid.classes_in(DayOfWeek::Tuesday, &mon_1.id).is_empty());
    }

    #[test]
    fn test_multiple_classes_share_a_cell() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");

        let classes = vec![
            class_on("chess", &sun_1, &[2]),
            class_on("art", &sun_1, &[2]),
            class_on("choir", &sun_1, &[3]),
        ];

        let grid = build_weekly_schedule(&classes);

        let cell = grid.classes_in(DayOfWeek::Sunday, &sun_1.id);
        assert_eq!(cell.len(), 3);
        assert_eq!(grid.days.len(), 1);
    }

    #[test]
    fn test_cell_keeps_input_order() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");

        let classes = vec![
            class_on("z", &sun_1, &[2]),
            class_on("a", &sun_1, &[2]),
            class_on("m", &sun_1, &[2]),
        ];

        let grid = build_weekly_schedule(&classes);

        let ids: Vec<&str> = grid
            .classes_in(DayOfWeek::Sunday, &sun_1.id)
            .iter()
            .map(|c| c.class.id.value())
            .collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");
        let mon_1 = slot("mon-1", DayOfWeek::Monday, "09:15", "09:50");
        let classes = vec![
            class_on("a", &sun_1, &[2]),
            class_on("b", &mon_1, &[2]),
        ];

        assert_eq!(
            build_weekly_schedule(&classes),
            build_weekly_schedule(&classes)
        );
    }

    #[test]
    fn test_reordered_input_builds_same_cells() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");
        let mon_1 = slot("mon-1", DayOfWeek::Monday, "09:15", "09:50");

        let forward = vec![
            class_on("a", &sun_1, &[2]),
            class_on("b", &sun_1, &[2]),
            class_on("c", &mon_1, &[3]),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let grid_a = build_weekly_schedule(&forward);
        let grid_b = build_weekly_schedule(&reversed);

        // Same key structure either way.
        let keys_a: Vec<_> = grid_a.days.keys().copied().collect();
        let keys_b: Vec<_> = grid_b.days.keys().copied().collect();
        assert_eq!(keys_a, keys_b);

        // Same per-cell membership, order aside.
        for (day, slots) in &grid_a.days {
            for (slot_id, cell) in slots {
                let mut ids_a: Vec<&str> = cell.iter().map(|c| c.class.id.value()).collect();
                let mut ids_b: Vec<&str> = grid_b
                    .classes_in(*day, slot_id)
                    .iter()
                    .map(|c| c.class.id.value())
                    .collect();
                ids_a.sort_unstable();
                ids_b.sort_unstable();
                assert_eq!(ids_a, ids_b);
            }
        }
    }

    #[test]
    fn test_filter_classes_for_grade() {
        let sun_1 = slot("sun-1", DayOfWeek::Sunday, "09:15", "09:50");
        let classes = vec![
            class_on("a", &sun_1, &[1, 2]),
            class_on("b", &sun_1, &[2, 3]),
            class_on("c", &sun_1, &[4]),
        ];

        let filtered = filter_classes_for_grade(&classes, Grade::new(2));
        let ids: Vec<&str> = filtered.iter().map(|c| c.class.id.value()).collect();
        assert_eq!(ids, vec!["a", "b"]);

        assert!(filter_classes_for_grade(&classes, Grade::new(6)).is_empty());
    }

    // ==================== Property-based tests ====================

    fn classes_from_picks(picks: &[(u8, u8)]) -> Vec<ClassWithTimeSlot> {
        picks
            .iter()
            .enumerate()
            .map(|(index, (day, slot_index))| {
                let day = DayOfWeek::from_index(*day).unwrap();
                let slot = slot(
                    &format!("slot-{}-{}", day.index(), slot_index),
                    day,
                    "09:15",
                    "09:50",
                );
                class_on(&format!("class-{}", index), &slot, &[2])
            })
            .collect()
    }

    proptest! {
        /// Every input class lands in exactly the cell keyed by its own
        /// day and slot, and nowhere else.
        #[test]
        fn prop_grid_places_every_class_exactly_once(
            picks in proptest::collection::vec((0u8..7, 0u8..6), 0..40)
        ) {
            let classes = classes_from_picks(&picks);

            let grid = build_weekly_schedule(&classes);

            prop_assert_eq!(grid.total_classes(), classes.len());
            for class in &classes {
                let cell = grid.classes_in(class.day(), &class.class.time_slot_id);
                prop_assert!(cell.iter().any(|c| c.class.id == class.class.id));
            }
        }

        /// Input order never changes which cells exist or what they hold.
        #[test]
        fn prop_reordering_preserves_cell_membership(
            picks in proptest::collection::vec((0u8..7, 0u8..6), 1..30)
        ) {
            let classes = classes_from_picks(&picks);
            let mut reversed = classes.clone();
            reversed.reverse();

            let forward = build_weekly_schedule(&classes);
            let backward = build_weekly_schedule(&reversed);

            prop_assert_eq!(
                forward.days.keys().collect::<Vec<_>>(),
                backward.days.keys().collect::<Vec<_>>()
            );
            for (day, slots) in &forward.days {
                for (slot_id, cell) in slots {
                    let mut forward_ids: Vec<&str> =
                        cell.iter().map(|c| c.class.id.value()).collect();
                    let mut backward_ids: Vec<&str> = backward
                        .classes_in(*day, slot_id)
                        .iter()
                        .map(|c| c.class.id.value())
                        .collect();
                    forward_ids.sort_unstable();
                    backward_ids.sort_unstable();
                    prop_assert_eq!(forward_ids, backward_ids);
                }
            }
        }
    }
}
