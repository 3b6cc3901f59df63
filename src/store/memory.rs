//! In-memory store implementation.
//!
//! This module provides a local implementation of the store trait suitable
//! for unit testing and local development. All data is held in memory in
//! insertion order, giving fast, deterministic, isolated execution.

use async_trait::async_trait;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::error::{ErrorContext, StoreError, StoreResult};
use super::schedule_store::ScheduleStore;
use crate::api::{
    ChildId, Class, ClassId, ClassWithTimeSlot, OwnerId, ScheduleSelection, SelectionId,
    TimeSlot, UserId,
};
use crate::models::ScheduleDataset;

/// In-memory store.
///
/// Rows live in `Vec`s so reads come back in insertion order, which is the
/// ordering contract the grid builder passes through to its cells. Selection
/// ids are minted as UUIDs the way the hosted store does.
#[derive(Clone)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

#[derive(Default)]
struct StoreData {
    time_slots: Vec<TimeSlot>,
    classes: Vec<ClassWithTimeSlot>,
    selections: Vec<ScheduleSelection>,

    // Connection health
    is_healthy: bool,
    // Injectable mutation failure for tests
    write_error: Option<String>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(StoreData {
                is_healthy: true,
                ..Default::default()
            })),
        }
    }

    /// Add a time slot. Setup helper for tests and local development.
    pub fn add_time_slot(&self, slot: TimeSlot) {
        self.data.write().time_slots.push(slot);
    }

    /// Add a class, joining it to its already-added time slot.
    ///
    /// # Arguments
    /// * `class` - Class row to add
    ///
    /// # Returns
    /// * `Ok(())` if the owning slot exists
    /// * `Err(StoreError::ValidationError)` on a dangling slot reference
    pub fn add_class(&self, class: Class) -> StoreResult<()> {
        let mut data = self.data.write();
        let slot = data
            .time_slots
            .iter()
            .find(|slot| slot.id == class.time_slot_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::validation_with_context(
                    format!(
                        "Class {} references unknown time slot {}",
                        class.id, class.time_slot_id
                    ),
                    ErrorContext::new("add_class")
                        .with_entity("class")
                        .with_entity_id(&class.id),
                )
            })?;
        data.classes.push(ClassWithTimeSlot::new(class, slot));
        Ok(())
    }

    /// Bulk-load a parsed dataset. Slots and classes replace nothing;
    /// rows append in dataset order.
    pub fn seed_dataset(&self, dataset: &ScheduleDataset) {
        let mut data = self.data.write();
        data.time_slots.extend(dataset.time_slots.iter().cloned());
        data.classes.extend(dataset.classes.iter().cloned());
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Inject a failure for subsequent select/unselect calls.
    /// `None` restores normal behavior.
    pub fn set_write_error(&self, message: Option<String>) {
        self.data.write().write_error = message;
    }

    /// Clear all data from the store, keeping the health flag.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = StoreData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Number of selection rows across all owners.
    pub fn selection_count(&self) -> usize {
        self.data.read().selections.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> StoreResult<()> {
        if !self.data.read().is_healthy {
            return Err(StoreError::connection("Store is not healthy"));
        }
        Ok(())
    }

    /// Helper to surface an injected write failure.
    fn check_write(&self, operation: &str) -> StoreResult<()> {
        if let Some(message) = self.data.read().write_error.clone() {
            return Err(StoreError::query_with_context(
                message,
                ErrorContext::new(operation).with_entity("selection"),
            ));
        }
        Ok(())
    }

    fn selections_for(&self, owner: &OwnerId) -> Vec<ScheduleSelection> {
        self.data
            .read()
            .selections
            .iter()
            .filter(|selection| &selection.owner == owner)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn health_check(&self) -> StoreResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn get_classes(&self) -> StoreResult<Vec<ClassWithTimeSlot>> {
        self.check_health()?;
        Ok(self.data.read().classes.clone())
    }

    async fn get_time_slots(&self) -> StoreResult<Vec<TimeSlot>> {
        self.check_health()?;
        Ok(self.data.read().time_slots.clone())
    }

    async fn get_user_schedule(
        &self,
        user_id: &UserId,
    ) -> StoreResult<Vec<ScheduleSelection>> {
        self.check_health()?;
        Ok(self.selections_for(&OwnerId::User(user_id.clone())))
    }

    async fn get_child_schedule(
        &self,
        child_id: &ChildId,
    ) -> StoreResult<Vec<ScheduleSelection>> {
        self.check_health()?;
        Ok(self.selections_for(&OwnerId::Child(child_id.clone())))
    }

    async fn select_class(&self, owner: &OwnerId, class_id: &ClassId) -> StoreResult<()> {
        self.check_health()?;
        self.check_write("select_class")?;

        let mut data = self.data.write();

        let class = data
            .classes
            .iter()
            .find(|class| &class.class.id == class_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::not_found_with_context(
                    format!("Class {} not found", class_id),
                    ErrorContext::new("select_class")
                        .with_entity("class")
                        .with_entity_id(class_id),
                )
            })?;

        // Row already present: uniqueness satisfied, nothing to do.
        let already_selected = data
            .selections
            .iter()
            .any(|selection| &selection.owner == owner && &selection.class.class.id == class_id);
        if already_selected {
            return Ok(());
        }

        data.selections.push(ScheduleSelection::new(
            SelectionId::new(uuid::Uuid::new_v4().to_string()),
            owner.clone(),
            class,
            Utc::now(),
        ));
        Ok(())
    }

    async fn unselect_class(&self, owner: &OwnerId, class_id: &ClassId) -> StoreResult<()> {
        self.check_health()?;
        self.check_write("unselect_class")?;

        self.data
            .write()
            .selections
            .retain(|selection| {
                !(&selection.owner == owner && &selection.class.class.id == class_id)
            });
        Ok(())
    }
}
