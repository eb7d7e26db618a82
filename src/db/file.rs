// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed slot: one JSON document per key under a data directory.
//!
//! Other processes sharing the directory are detected by polling: the slot
//! remembers the last contents it read or wrote for each key and publishes a
//! [`SlotChange`] when the file on disk no longer matches.

use crate::db::{SlotBackend, SlotChange, CHANGE_CHANNEL_CAPACITY};
use crate::error::AppError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Slot stored as files in a directory.
pub struct FileSlot {
    dir: PathBuf,
    /// Last contents observed per key (`None` = file absent)
    known: Mutex<HashMap<String, Option<String>>>,
    changes: broadcast::Sender<SlotChange>,
}

impl FileSlot {
    /// Open a slot directory, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Storage(format!(
                "Failed to create data directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        tracing::info!(dir = %dir.display(), "Opened file slot");

        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Ok(Self {
            dir,
            known: Mutex::new(HashMap::new()),
            changes,
        })
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn known(&self) -> MutexGuard<'_, HashMap<String, Option<String>>> {
        self.known.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn read_file(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read slot {}: {}",
                key, e
            ))),
        }
    }

    /// Compare every key this slot has touched against the files on disk and
    /// publish a change for each one modified elsewhere. Returns the changed
    /// keys.
    pub fn poll_external_changes(&self) -> Vec<String> {
        let mut known = self.known();
        let mut changed = Vec::new();

        for (key, last_seen) in known.iter_mut() {
            let current = match self.read_file(key) {
                Ok(current) => current,
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Slot poll failed");
                    continue;
                }
            };

            if current != *last_seen {
                *last_seen = current;
                changed.push(key.clone());
            }
        }
        drop(known);

        for key in &changed {
            tracing::debug!(key = %key, "Slot changed externally");
            // No receivers is fine; nobody is listening yet
            let _ = self.changes.send(SlotChange { key: key.clone() });
        }

        changed
    }

    /// Poll for external changes on a fixed period until the slot is dropped
    /// by every other owner.
    pub fn spawn_watcher(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        let slot = Arc::downgrade(&self);
        drop(self);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let Some(slot) = slot.upgrade() else {
                    break;
                };
                slot.poll_external_changes();
            }
        })
    }
}

impl SlotBackend for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let mut known = self.known();
        let contents = self.read_file(key)?;
        known.insert(key.to_string(), contents.clone());
        Ok(contents)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut known = self.known();

        // Write-then-rename so readers never see a partial document
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&tmp, value)
            .and_then(|_| fs::rename(&tmp, &path))
            .map_err(|e| AppError::Storage(format!("Failed to write slot {}: {}", key, e)))?;

        known.insert(key.to_string(), Some(value.to_string()));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.changes.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path()).unwrap();
        assert_eq!(slot.read("activities").unwrap(), None);
    }

    #[test]
    fn test_own_writes_are_not_external_changes() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path()).unwrap();
        let mut rx = slot.subscribe();

        slot.write("activities", "[]").unwrap();
        assert_eq!(slot.read("activities").unwrap().as_deref(), Some("[]"));
        assert!(slot.poll_external_changes().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_foreign_write_is_published() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::open(dir.path()).unwrap();
        let mut rx = slot.subscribe();

        slot.write("activities", "[]").unwrap();
        fs::write(slot.path_for("activities"), "[{}]").unwrap();

        assert_eq!(slot.poll_external_changes(), vec!["activities".to_string()]);
        assert_eq!(
            rx.try_recv().unwrap(),
            SlotChange {
                key: "activities".to_string()
            }
        );

        // Already observed
        assert!(slot.poll_external_changes().is_empty());
    }
}
