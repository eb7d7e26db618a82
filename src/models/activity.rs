// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Timed activity model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Stored activity record.
///
/// Serialized field names match the persisted slot format
/// `{id, createdAt, title, splits}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    /// Opaque unique identifier, fixed at creation
    pub id: String,
    /// Creation time (ms since epoch)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub created_at: i64,
    /// User-editable display title
    #[serde(default)]
    pub title: String,
    /// Split timestamps (ms since epoch): the start mark, then one per lap
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number[]"))]
    pub splits: Vec<i64>,
}

/// One completed lap, derived from two consecutive splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Lap {
    /// 1-indexed lap number
    pub number: usize,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub started_at: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration_ms: i64,
}

impl Activity {
    pub fn new(id: String, created_at: i64) -> Self {
        Self {
            id,
            created_at,
            title: String::new(),
            splits: Vec::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        !self.splits.is_empty()
    }

    /// Number of completed laps.
    pub fn lap_count(&self) -> usize {
        self.splits.len().saturating_sub(1)
    }

    /// Duration of lap `k` (1-indexed): `splits[k] - splits[k-1]`.
    ///
    /// Splits come from the slot as written by any client, so differences
    /// saturate rather than overflow.
    pub fn lap_duration(&self, k: usize) -> Option<i64> {
        if k == 0 || k >= self.splits.len() {
            return None;
        }
        Some(self.splits[k].saturating_sub(self.splits[k - 1]))
    }

    /// All completed laps in order.
    pub fn laps(&self) -> Vec<Lap> {
        self.splits
            .windows(2)
            .enumerate()
            .map(|(i, pair)| Lap {
                number: i + 1,
                started_at: pair[0],
                duration_ms: pair[1].saturating_sub(pair[0]),
            })
            .collect()
    }

    /// Time from the start mark to the most recent split.
    pub fn total_ms(&self) -> i64 {
        match (self.splits.first(), self.splits.last()) {
            (Some(first), Some(last)) => last.saturating_sub(*first),
            _ => 0,
        }
    }

    /// Shortest completed lap, if any.
    pub fn best_lap(&self) -> Option<Lap> {
        self.laps().into_iter().min_by_key(|lap| lap.duration_ms)
    }

    /// Elapsed time in the lap currently being timed.
    pub fn current_lap_elapsed(&self, now: i64) -> Option<i64> {
        self.splits.last().map(|last| now.saturating_sub(*last))
    }
}
