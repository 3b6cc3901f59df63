//! Per-owner selection cache with refresh-after-write semantics.
//!
//! [`SelectionTracker`] keeps one entry per owner (user or child) holding
//! the owner's selection list and its load phase. Every select/unselect
//! is followed by an unconditional re-fetch of the owner's full list;
//! there is no optimistic local patch. Writes for the same owner are
//! serialized, so a second mutation waits for the first write+refetch to
//! finish.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::{ChildId, ClassId, OwnerId, ScheduleSelection};
use crate::session::Session;
use crate::store::{ErrorContext, ScheduleStore, StoreError, StoreResult};

/// Lifecycle of one owner's cached selection list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// Owner not refreshed yet.
    #[default]
    Idle,
    /// A refresh is in flight.
    Loading,
    /// The list reflects the last successful refresh.
    Ready,
    /// The last refresh failed; the list is the previous one.
    Failed,
}

/// Snapshot of one owner's tracked state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSelections {
    pub owner: OwnerId,
    pub phase: LoadPhase,
    pub selections: Vec<ScheduleSelection>,
    /// Message of the most recent failed refresh or write.
    pub error: Option<String>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct OwnerEntry {
    phase: LoadPhase,
    selections: Vec<ScheduleSelection>,
    error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
    /// Epoch of the owner's latest refresh, issued by the tracker-wide
    /// counter; completions carrying any other epoch are discarded.
    epoch: u64,
    /// Serializes write+refetch sequences for this owner.
    write_lock: Arc<Mutex<()>>,
}

#[derive(Debug, Clone, Copy)]
enum MutationKind {
    Select,
    Unselect,
}

impl MutationKind {
    fn operation(self) -> &'static str {
        match self {
            MutationKind::Select => "select_class",
            MutationKind::Unselect => "unselect_class",
        }
    }

    fn verb(self) -> &'static str {
        match self {
            MutationKind::Select => "selecting",
            MutationKind::Unselect => "unselecting",
        }
    }
}

/// Tracks selection state per owner over any [`ScheduleStore`].
pub struct SelectionTracker<S: ScheduleStore> {
    store: Arc<S>,
    owners: Arc<RwLock<HashMap<OwnerId, OwnerEntry>>>,
    /// Issues refresh epochs. Tracker-wide, never reused, so an entry
    /// recreated after `forget` cannot match an epoch still in flight.
    refresh_epoch: Arc<AtomicU64>,
}

// Derived Clone would demand S: Clone; only the Arcs are cloned.
impl<S: ScheduleStore> Clone for SelectionTracker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            owners: Arc::clone(&self.owners),
            refresh_epoch: Arc::clone(&self.refresh_epoch),
        }
    }
}

impl<S: ScheduleStore> SelectionTracker<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            owners: Arc::new(RwLock::new(HashMap::new())),
            refresh_epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current snapshot for an owner. Untracked owners report Idle with
    /// an empty list.
    pub fn state(&self, owner: &OwnerId) -> OwnerSelections {
        let owners = self.owners.read();
        match owners.get(owner) {
            Some(entry) => OwnerSelections {
                owner: owner.clone(),
                phase: entry.phase,
                selections: entry.selections.clone(),
                error: entry.error.clone(),
                refreshed_at: entry.refreshed_at,
            },
            None => OwnerSelections {
                owner: owner.clone(),
                phase: LoadPhase::Idle,
                selections: Vec::new(),
                error: None,
                refreshed_at: None,
            },
        }
    }

    /// Membership check against the cached list only; never touches the
    /// store.
    pub fn is_class_selected(&self, owner: &OwnerId, class_id: &ClassId) -> bool {
        self.owners
            .read()
            .get(owner)
            .map(|entry| {
                entry
                    .selections
                    .iter()
                    .any(|selection| &selection.class.class.id == class_id)
            })
            .unwrap_or(false)
    }

    /// Drop an owner's cached state. A refresh already in flight for the
    /// owner discards its result on completion instead of recreating the
    /// entry.
    pub fn forget(&self, owner: &OwnerId) {
        if self.owners.write().remove(owner).is_some() {
            debug!("Selection tracker: forgot state for {}", owner);
        }
    }

    /// Re-fetch the owner's selections and replace the cached list.
    ///
    /// On failure the previous list is kept, the phase moves to Failed,
    /// the message lands in `error`, and the error is returned.
    pub async fn refresh(&self, owner: &OwnerId) -> StoreResult<()> {
        info!("Selection tracker: refreshing selections for {}", owner);
        let epoch = self.begin_refresh(owner);
        let result = self.store.get_owner_schedule(owner).await;
        self.finish_refresh(owner, epoch, result)
    }

    /// Select a class for an owner, then re-fetch that owner's list.
    ///
    /// Store failures are recorded in the owner's `error` field and
    /// returned to the caller as well.
    pub async fn select_class(
        &self,
        session: &Session,
        owner: &OwnerId,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        self.mutate(session, owner, class_id, MutationKind::Select)
            .await
    }

    /// Remove a selection for an owner, then re-fetch that owner's list.
    pub async fn unselect_class(
        &self,
        session: &Session,
        owner: &OwnerId,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        self.mutate(session, owner, class_id, MutationKind::Unselect)
            .await
    }

    /// Select a class for the session's own user.
    pub async fn select_class_for_user(
        &self,
        session: &Session,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        let owner = OwnerId::User(session.user_id.clone());
        self.select_class(session, &owner, class_id).await
    }

    /// Remove a selection for the session's own user.
    pub async fn unselect_class_for_user(
        &self,
        session: &Session,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        let owner = OwnerId::User(session.user_id.clone());
        self.unselect_class(session, &owner, class_id).await
    }

    /// Select a class for one of the session user's children.
    pub async fn select_class_for_child(
        &self,
        session: &Session,
        child_id: &ChildId,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        let owner = OwnerId::Child(child_id.clone());
        self.select_class(session, &owner, class_id).await
    }

    /// Remove a selection for one of the session user's children.
    pub async fn unselect_class_for_child(
        &self,
        session: &Session,
        child_id: &ChildId,
        class_id: &ClassId,
    ) -> StoreResult<()> {
        let owner = OwnerId::Child(child_id.clone());
        self.unselect_class(session, &owner, class_id).await
    }

    fn begin_refresh(&self, owner: &OwnerId) -> u64 {
        let mut owners = self.owners.write();
        // Issued under the map lock; per owner the epoch is monotonic.
        let epoch = self.refresh_epoch.fetch_add(1, Ordering::Relaxed) + 1;
        let entry = owners.entry(owner.clone()).or_default();
        entry.epoch = epoch;
        entry.phase = LoadPhase::Loading;
        entry.error = None;
        epoch
    }

    fn finish_refresh(
        &self,
        owner: &OwnerId,
        epoch: u64,
        result: StoreResult<Vec<ScheduleSelection>>,
    ) -> StoreResult<()> {
        let mut owners = self.owners.write();
        let entry = match owners.get_mut(owner) {
            Some(entry) => entry,
            None => {
                // Forgotten while the fetch was in flight.
                debug!(
                    "Selection tracker: dropping stale refresh for {}",
                    owner
                );
                return result.map(|_| ());
            }
        };
        if entry.epoch != epoch {
            // A newer refresh owns this entry now.
            return result.map(|_| ());
        }
        match result {
            Ok(selections) => {
                entry.phase = LoadPhase::Ready;
                entry.selections = selections;
                entry.refreshed_at = Some(Utc::now());
                Ok(())
            }
            Err(err) => {
                warn!(
                    "Selection tracker: refresh failed for {}: {}",
                    owner, err
                );
                entry.phase = LoadPhase::Failed;
                entry.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    async fn mutate(
        &self,
        session: &Session,
        owner: &OwnerId,
        class_id: &ClassId,
        kind: MutationKind,
    ) -> StoreResult<()> {
        if !session.can_select_classes() {
            return Err(StoreError::permission_denied_with_context(
                "Session may not modify selections",
                ErrorContext::new(kind.operation()).with_entity("selection"),
            ));
        }

        // Clone the handle so the map lock is not held across the await.
        let write_lock = {
            let mut owners = self.owners.write();
            let entry = owners.entry(owner.clone()).or_default();
            Arc::clone(&entry.write_lock)
        };
        let _guard = write_lock.lock().await;

        info!(
            "Selection tracker: {} class {} for {}",
            kind.verb(),
            class_id,
            owner
        );
        let write_result = match kind {
            MutationKind::Select => self.store.select_class(owner, class_id).await,
            MutationKind::Unselect => self.store.unselect_class(owner, class_id).await,
        };
        if let Err(err) = write_result {
            warn!(
                "Selection tracker: {} class {} for {} failed: {}",
                kind.verb(),
                class_id,
                owner,
                err
            );
            self.record_write_error(owner, &err);
            return Err(err);
        }

        self.refresh(owner).await
    }

    // Keeps phase and list untouched; the list still reflects the last
    // successful refresh.
    fn record_write_error(&self, owner: &OwnerId, err: &StoreError) {
        let mut owners = self.owners.write();
        let entry = owners.entry(owner.clone()).or_default();
        entry.error = Some(err.to_string());
    }
}
