//! Schedule store trait.
//!
//! This trait defines the operations the scheduling core consumes from the
//! hosted persistence service: catalog reads, per-owner selection reads,
//! and the select/unselect mutations.

use async_trait::async_trait;

use super::error::StoreResult;
use crate::api::{
    ChildId, ClassId, ClassWithTimeSlot, OwnerId, ScheduleSelection, TimeSlot, UserId,
};

/// Store trait for schedule data access.
///
/// Classes and time slots are read-only from the core's perspective; their
/// lifecycle belongs to the external admin workflow. Selections are the only
/// rows the core mutates, and only through `select_class`/`unselect_class`.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if connection is healthy
    /// - `Ok(false)` if connection is unhealthy but no error occurred
    /// - `Err(StoreError)` if an error occurred during the check
    async fn health_check(&self) -> StoreResult<bool>;

    // ==================== Catalog Reads ====================

    /// Fetch all classes, each joined with its owning time slot.
    ///
    /// # Returns
    /// * `Ok(Vec<ClassWithTimeSlot>)` - All classes with embedded slots
    /// * `Err(StoreError)` - If the operation fails
    async fn get_classes(&self) -> StoreResult<Vec<ClassWithTimeSlot>>;

    /// Fetch the full time slot catalog.
    ///
    /// # Returns
    /// * `Ok(Vec<TimeSlot>)` - All time slots, all days
    /// * `Err(StoreError)` - If the operation fails
    async fn get_time_slots(&self) -> StoreResult<Vec<TimeSlot>>;

    // ==================== Selection Reads ====================

    /// Fetch a user's current selections, each joined with its class and
    /// that class's time slot.
    ///
    /// # Arguments
    /// * `user_id` - The owning user
    ///
    /// # Returns
    /// * `Ok(Vec<ScheduleSelection>)` - The user's selections, possibly empty
    /// * `Err(StoreError)` - If the operation fails
    async fn get_user_schedule(&self, user_id: &UserId)
        -> StoreResult<Vec<ScheduleSelection>>;

    /// Fetch a child's current selections.
    ///
    /// # Arguments
    /// * `child_id` - The owning child profile
    ///
    /// # Returns
    /// * `Ok(Vec<ScheduleSelection>)` - The child's selections, possibly empty
    /// * `Err(StoreError)` - If the operation fails
    async fn get_child_schedule(
        &self,
        child_id: &ChildId,
    ) -> StoreResult<Vec<ScheduleSelection>>;

    // ==================== Selection Mutations ====================

    /// Create a selection row for an owner and class.
    ///
    /// Selecting an already-selected class is a no-op success; conflict
    /// detection is the caller's concern, not the store's.
    ///
    /// # Arguments
    /// * `owner` - The user or child the selection belongs to
    /// * `class_id` - The class being selected
    ///
    /// # Returns
    /// * `Ok(())` - Selection row exists after the call
    /// * `Err(StoreError::NotFound)` - If the class doesn't exist
    /// * `Err(StoreError)` - If the operation fails
    async fn select_class(&self, owner: &OwnerId, class_id: &ClassId) -> StoreResult<()>;

    /// Delete an owner's selection row for a class.
    ///
    /// Unselecting a class that is not selected is a no-op success.
    ///
    /// # Arguments
    /// * `owner` - The user or child the selection belongs to
    /// * `class_id` - The class being unselected
    ///
    /// # Returns
    /// * `Ok(())` - No selection row exists after the call
    /// * `Err(StoreError)` - If the operation fails
    async fn unselect_class(&self, owner: &OwnerId, class_id: &ClassId) -> StoreResult<()>;

    /// Fetch selections for either owner kind.
    ///
    /// Default implementation dispatches to the user/child reads.
    async fn get_owner_schedule(&self, owner: &OwnerId) -> StoreResult<Vec<ScheduleSelection>> {
        match owner {
            OwnerId::User(user_id) => self.get_user_schedule(user_id).await,
            OwnerId::Child(child_id) => self.get_child_schedule(child_id).await,
        }
    }
}
