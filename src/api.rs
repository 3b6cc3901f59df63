//! Core domain types for the scheduling engine.
//!
//! This file consolidates the record shapes read from the external store
//! and the derived weekly grid. All types derive Serialize/Deserialize
//! for JSON interchange with the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::WallTime;

/// Time slot identifier (store primary key).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlotId(pub String);

/// Class identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClassId(pub String);

/// Schedule selection identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SelectionId(pub String);

/// Authenticated user identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Child profile identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChildId(pub String);

impl TimeSlotId {
    pub fn new(value: impl Into<String>) -> Self {
        TimeSlotId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ClassId {
    pub fn new(value: impl Into<String>) -> Self {
        ClassId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl SelectionId {
    pub fn new(value: impl Into<String>) -> Self {
        SelectionId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        UserId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl ChildId {
    pub fn new(value: impl Into<String>) -> Self {
        ChildId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TimeSlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ClassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for SelectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for ChildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user or child whose selections are being tracked.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerId {
    User(UserId),
    Child(ChildId),
}

impl OwnerId {
    pub fn user(id: impl Into<String>) -> Self {
        OwnerId::User(UserId::new(id))
    }

    pub fn child(id: impl Into<String>) -> Self {
        OwnerId::Child(ChildId::new(id))
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OwnerId::User(id) => write!(f, "user:{}", id),
            OwnerId::Child(id) => write!(f, "child:{}", id),
        }
    }
}

/// Day of the school week, stored as 0=Sunday .. 6=Saturday.
/// Only Sunday through Thursday carry lessons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Sunday..Thursday, the days the grid renders.
    pub const SCHOOL_WEEK: [DayOfWeek; 5] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
    ];

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(DayOfWeek::Sunday),
            1 => Some(DayOfWeek::Monday),
            2 => Some(DayOfWeek::Tuesday),
            3 => Some(DayOfWeek::Wednesday),
            4 => Some(DayOfWeek::Thursday),
            5 => Some(DayOfWeek::Friday),
            6 => Some(DayOfWeek::Saturday),
            _ => None,
        }
    }

    pub fn index(&self) -> u8 {
        *self as u8
    }
}

// Stored form is the bare 0..6 integer, matching the store's column.
impl Serialize for DayOfWeek {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for DayOfWeek {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = u8::deserialize(deserializer)?;
        DayOfWeek::from_index(raw).ok_or_else(|| {
            serde::de::Error::custom(format!("day of week out of range: {}", raw))
        })
    }
}

/// School grade level (1 = first grade).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grade(pub u8);

impl Grade {
    pub fn new(value: u8) -> Self {
        Grade(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Environment tag carried on class rows. Ignored by the grid and
/// conflict logic; fetch paths filter on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Test,
    #[default]
    Prod,
}

/// A named, day-scoped interval that classes attach to.
/// Start < end is guaranteed by the admin form layer, not re-checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: TimeSlotId,
    /// Display name; drives catalog classification.
    pub name: String,
    pub day_of_week: DayOfWeek,
    pub start_time: WallTime,
    pub end_time: WallTime,
}

impl TimeSlot {
    pub fn new(
        id: TimeSlotId,
        name: impl Into<String>,
        day_of_week: DayOfWeek,
        start_time: WallTime,
        end_time: WallTime,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            day_of_week,
            start_time,
            end_time,
        }
    }
}

/// A class offered in one time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub teacher: String,
    /// Owning time slot; the slot carries the day.
    pub time_slot_id: TimeSlotId,
    /// Grade levels the class admits (non-empty).
    pub grades: Vec<Grade>,
    /// Mandatory classes are pre-assigned rather than elective.
    #[serde(default)]
    pub mandatory: bool,
    /// Double lessons also occupy the next consecutive slot.
    #[serde(default)]
    pub is_double: bool,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub scope: Scope,
}

impl Class {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: ClassId,
        title: impl Into<String>,
        description: impl Into<String>,
        teacher: impl Into<String>,
        time_slot_id: TimeSlotId,
        grades: Vec<Grade>,
        mandatory: bool,
        is_double: bool,
        room: impl Into<String>,
        scope: Scope,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            teacher: teacher.into(),
            time_slot_id,
            grades,
            mandatory,
            is_double,
            room: room.into(),
            scope,
        }
    }

    pub fn admits_grade(&self, grade: Grade) -> bool {
        self.grades.contains(&grade)
    }
}

/// A class joined with its owning time slot, as the store returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassWithTimeSlot {
    #[serde(flatten)]
    pub class: Class,
    pub time_slot: TimeSlot,
}

impl ClassWithTimeSlot {
    pub fn new(class: Class, time_slot: TimeSlot) -> Self {
        Self { class, time_slot }
    }

    /// Day the class meets, read from its slot.
    pub fn day(&self) -> DayOfWeek {
        self.time_slot.day_of_week
    }
}

/// A single owner's choice to attend one class, joined with that class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSelection {
    pub id: SelectionId,
    pub owner: OwnerId,
    pub class: ClassWithTimeSlot,
    pub created_at: DateTime<Utc>,
}

impl ScheduleSelection {
    pub fn new(
        id: SelectionId,
        owner: OwnerId,
        class: ClassWithTimeSlot,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            class,
            created_at,
        }
    }
}

/// One day's column of the grid: time slot id → classes in that cell.
pub type DaySchedule = BTreeMap<TimeSlotId, Vec<ClassWithTimeSlot>>;

/// Derived day → time slot → classes projection.
/// Always recomputed from the class list, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub days: BTreeMap<DayOfWeek, DaySchedule>,
}

impl WeeklySchedule {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Classes occupying one grid cell, empty if the cell does not exist.
    pub fn classes_in(&self, day: DayOfWeek, slot: &TimeSlotId) -> &[ClassWithTimeSlot] {
        self.days
            .get(&day)
            .and_then(|slots| slots.get(slot))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total class count across all cells.
    pub fn total_classes(&self) -> usize {
        self.days
            .values()
            .flat_map(|slots| slots.values())
            .map(Vec::len)
            .sum()
    }
}
