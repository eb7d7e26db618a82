// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process slot for tests and ephemeral runs.

use crate::db::{SlotBackend, SlotChange, CHANGE_CHANNEL_CAPACITY};
use crate::error::AppError;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

/// Slot held entirely in memory.
pub struct MemorySlot {
    values: DashMap<String, String>,
    fail_writes: AtomicBool,
    changes: broadcast::Sender<SlotChange>,
}

impl Default for MemorySlot {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySlot {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: DashMap::new(),
            fail_writes: AtomicBool::new(false),
            changes,
        }
    }

    /// Write as another session would, notifying subscribers.
    pub fn write_external(&self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        let _ = self.changes.send(SlotChange {
            key: key.to_string(),
        });
    }

    /// Make subsequent writes fail (simulates a full or read-only disk).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl SlotBackend for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.values.get(key).map(|v| v.value().clone()))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Storage(format!(
                "Slot {} is not writable",
                key
            )));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<SlotChange> {
        self.changes.subscribe()
    }
}
