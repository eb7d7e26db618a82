// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity store: the durable collection of timed activities.
//!
//! The whole collection lives in memory and is written back to a single slot
//! key on every mutation (read-modify-write of the entire array). When the
//! slot reports a change made elsewhere the collection is reloaded wholesale;
//! the last writer wins and nothing is merged.

use crate::db::SlotBackend;
use crate::error::{AppError, Result};
use crate::models::Activity;
use crate::time_utils::Clock;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Shared activity collection backed by a durable slot.
pub struct ActivityStore {
    slot: Arc<dyn SlotBackend>,
    key: String,
    clock: Arc<dyn Clock>,
    activities: RwLock<Vec<Activity>>,
}

impl ActivityStore {
    /// Open the store, loading whatever the slot currently holds.
    ///
    /// A slot that was never written starts empty. So does one holding data
    /// that does not decode as an activity list.
    pub fn open(
        slot: Arc<dyn SlotBackend>,
        key: impl Into<String>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let key = key.into();
        let activities = load_collection(slot.as_ref(), &key)?;

        tracing::info!(key = %key, count = activities.len(), "Activity store loaded");

        Ok(Self {
            slot,
            key,
            clock,
            activities: RwLock::new(activities),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Activity>> {
        self.activities.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Activity>> {
        self.activities.write().unwrap_or_else(|e| e.into_inner())
    }

    /// The full collection in storage order.
    pub fn list(&self) -> Vec<Activity> {
        self.read().to_vec()
    }

    /// The collection newest first, as the list view shows it.
    pub fn list_recent(&self) -> Vec<Activity> {
        let mut activities = self.list();
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        activities
    }

    /// Look up one activity.
    pub fn get(&self, id: &str) -> Result<Activity> {
        self.read()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::activity_not_found(id))
    }

    /// Create and persist a new, not-yet-started activity.
    pub fn create(&self) -> Result<Activity> {
        let mut guard = self.write();

        let mut id = uuid::Uuid::new_v4().to_string();
        while guard.iter().any(|a| a.id == id) {
            id = uuid::Uuid::new_v4().to_string();
        }
        let activity = Activity::new(id, self.clock.now_millis());

        let mut next = guard.to_vec();
        next.push(activity.clone());
        self.persist(&next)?;
        *guard = next;

        tracing::info!(id = %activity.id, "Activity created");
        Ok(activity)
    }

    /// Replace the stored activity with the same id.
    ///
    /// `id` and `created_at` are fixed at creation; only the title and splits
    /// of `activity` are taken. Unknown ids are `NotFound`.
    pub fn update(&self, activity: &Activity) -> Result<()> {
        let mut guard = self.write();

        let index = guard
            .iter()
            .position(|a| a.id == activity.id)
            .ok_or_else(|| AppError::activity_not_found(&activity.id))?;

        let mut next = guard.to_vec();
        next[index].title = activity.title.clone();
        next[index].splits = activity.splits.clone();
        self.persist(&next)?;
        *guard = next;

        tracing::debug!(
            id = %activity.id,
            splits = activity.splits.len(),
            "Activity updated"
        );
        Ok(())
    }

    /// Set only the title of a stored activity, returning the updated record.
    ///
    /// Splits are read under the same write guard, so a split recorded since
    /// the caller last looked is kept.
    pub fn rename(&self, id: &str, title: &str) -> Result<Activity> {
        let mut guard = self.write();

        let index = guard
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::activity_not_found(id))?;

        let mut next = guard.to_vec();
        next[index].title = title.to_string();
        let renamed = next[index].clone();
        self.persist(&next)?;
        *guard = next;

        tracing::info!(id = %id, "Activity renamed");
        Ok(renamed)
    }

    /// Remove an activity, returning what was removed.
    pub fn destroy(&self, id: &str) -> Result<Activity> {
        let mut guard = self.write();

        let index = guard
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| AppError::activity_not_found(id))?;

        let mut next = guard.to_vec();
        let removed = next.remove(index);
        self.persist(&next)?;
        *guard = next;

        tracing::info!(id = %id, "Activity deleted");
        Ok(removed)
    }

    /// Replace the in-memory collection with the slot contents.
    pub fn reload(&self) -> Result<()> {
        let mut guard = self.write();
        let activities = load_collection(self.slot.as_ref(), &self.key)?;
        tracing::info!(key = %self.key, count = activities.len(), "Activity store reloaded");
        *guard = activities;
        Ok(())
    }

    fn persist(&self, activities: &[Activity]) -> Result<()> {
        let encoded = serde_json::to_string(activities)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode activities: {}", e)))?;
        self.slot.write(&self.key, &encoded)
    }

    /// Reload whenever the slot reports that this store's key changed.
    ///
    /// The task ends when the slot's notification channel closes.
    pub fn spawn_reload_on_change(self: &Arc<Self>) -> JoinHandle<()> {
        let mut rx = self.slot.subscribe();
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                let reload = match rx.recv().await {
                    Ok(change) => {
                        let Some(store) = store.upgrade() else {
                            break;
                        };
                        (change.key == store.key).then_some(store)
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Missed slot change notifications");
                        match store.upgrade() {
                            Some(store) => Some(store),
                            None => break,
                        }
                    }
                    Err(RecvError::Closed) => break,
                };

                if let Some(store) = reload {
                    if let Err(e) = store.reload() {
                        tracing::warn!(error = %e, "Failed to reload activity store");
                    }
                }
            }
        })
    }
}

/// Read and decode the collection under `key`.
fn load_collection(slot: &dyn SlotBackend, key: &str) -> Result<Vec<Activity>> {
    Ok(slot
        .read(key)?
        .map(|raw| decode_collection(key, &raw))
        .unwrap_or_default())
}

/// Decode a persisted collection. Corrupt data resets to empty.
fn decode_collection(key: &str, raw: &str) -> Vec<Activity> {
    match serde_json::from_str::<Vec<Activity>>(raw) {
        Ok(activities) => activities,
        Err(e) => {
            tracing::warn!(
                key = %key,
                error = %e,
                "Corrupt activity store, starting empty"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_collection_accepts_persisted_format() {
        let raw = r#"[{"id":"x","createdAt":5,"title":"Intervals","splits":[10,20]}]"#;
        let activities = decode_collection("activities", raw);
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].created_at, 5);
        assert_eq!(activities[0].splits, vec![10, 20]);
    }

    #[test]
    fn test_decode_collection_resets_corrupt_data() {
        assert!(decode_collection("activities", "not json").is_empty());
        assert!(decode_collection("activities", r#"{"id":"x"}"#).is_empty());
        assert!(decode_collection("activities", r#"[{"title":"no id"}]"#).is_empty());
    }
}
