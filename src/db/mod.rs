// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable key-value slots backing the activity store.

pub mod file;
pub mod memory;

pub use file::FileSlot;
pub use memory::MemorySlot;

use crate::error::AppError;
use tokio::sync::broadcast;

/// Slot keys as constants.
pub mod keys {
    pub const ACTIVITIES: &str = "activities";
}

/// Capacity of the change notification channel.
pub(crate) const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Notification that a slot was written by someone other than this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChange {
    pub key: String,
}

/// A durable key-value store holding whole serialized documents.
///
/// Writes are synchronous: a `read` after a successful `write` returns the
/// written value. Subscribers only hear about writes made elsewhere.
pub trait SlotBackend: Send + Sync {
    /// Read the value under `key`, `None` if the slot was never written.
    fn read(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Subscribe to external change notifications.
    fn subscribe(&self) -> broadcast::Receiver<SlotChange>;
}
