// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split timer state machine.
//!
//! [`SplitTimer`] is the pure per-activity machine:
//!
//! - `NotStarted` (no splits) --start--> `Running`
//! - `Running` --start--> `Running` (records a lap split)
//! - `Running` --undo--> `Running` (drops the last split, needs a completed lap)
//! - `Running` --stop--> `Reviewing` (needs a completed lap, splits untouched)
//! - `Reviewing` --cancel--> `Running`
//! - `Reviewing` --finish--> session ends, splits stay as recorded
//!
//! Anything else is a no-op. [`TimerService`] binds the machine to the
//! activity store so every split change is persisted.

use crate::error::Result;
use crate::models::{Activity, Lap};
use crate::services::ActivityStore;
use crate::time_utils::{format_millis, Clock, DurationParts};
use dashmap::DashSet;
use serde::Serialize;
use std::sync::{Arc, Mutex};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Default window after a split in which the finished lap stays hidden.
pub const DEFAULT_QUIET_PERIOD_MS: i64 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum TimerPhase {
    NotStarted,
    Running,
    Reviewing,
}

/// Timer over one activity's splits.
#[derive(Debug, Clone)]
pub struct SplitTimer {
    activity: Activity,
    reviewing: bool,
}

impl SplitTimer {
    pub fn new(activity: Activity) -> Self {
        Self {
            activity,
            reviewing: false,
        }
    }

    /// Rebuild a timer that was in review. The flag is dropped if the splits
    /// no longer have a completed lap (e.g. after an external reload).
    pub fn resume(activity: Activity, reviewing: bool) -> Self {
        let mut timer = Self::new(activity);
        timer.reviewing = reviewing && timer.has_completed_lap();
        timer
    }

    pub fn activity(&self) -> &Activity {
        &self.activity
    }

    pub fn into_activity(self) -> Activity {
        self.activity
    }

    pub fn phase(&self) -> TimerPhase {
        if self.reviewing {
            TimerPhase::Reviewing
        } else if self.activity.is_started() {
            TimerPhase::Running
        } else {
            TimerPhase::NotStarted
        }
    }

    fn has_completed_lap(&self) -> bool {
        self.activity.splits.len() > 1
    }

    pub fn can_undo(&self) -> bool {
        !self.reviewing && self.has_completed_lap()
    }

    pub fn can_stop(&self) -> bool {
        !self.reviewing && self.has_completed_lap()
    }

    /// Begin timing, or record a lap split. Returns whether splits changed.
    pub fn start(&mut self, now: i64) -> bool {
        if self.reviewing {
            return false;
        }
        self.activity.splits.push(now);
        true
    }

    /// Drop the most recent split. Returns whether splits changed.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.activity.splits.pop();
        true
    }

    /// Open the end-of-effort summary.
    pub fn stop(&mut self) -> bool {
        if !self.can_stop() {
            return false;
        }
        self.reviewing = true;
        true
    }

    /// Close the summary and keep timing.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.reviewing, false)
    }

    /// Derived values for one redraw.
    pub fn display(&self, now: i64, quiet_period_ms: i64) -> TimerDisplay {
        let activity = &self.activity;
        let current_lap_ms = activity.current_lap_elapsed(now);
        let in_quiet_period = current_lap_ms.is_some_and(|elapsed| elapsed < quiet_period_ms);

        let last_lap = activity
            .laps()
            .last()
            .copied()
            .filter(|_| !in_quiet_period);

        TimerDisplay {
            id: activity.id.clone(),
            phase: self.phase(),
            lap_count: activity.lap_count(),
            current_lap_ms,
            current_lap: current_lap_ms.map(format_millis).unwrap_or_default(),
            current_lap_parts: current_lap_ms.and_then(|ms| DurationParts::from_millis(ms as f64)),
            in_quiet_period,
            last_lap_formatted: last_lap.map(|lap| format_millis(lap.duration_ms)),
            last_lap,
            can_undo: self.can_undo(),
            can_stop: self.can_stop(),
        }
    }
}

/// Snapshot of what the timer view shows at one instant.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TimerDisplay {
    pub id: String,
    pub phase: TimerPhase,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub lap_count: usize,
    /// Elapsed time in the current lap; `None` before the start
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub current_lap_ms: Option<i64>,
    pub current_lap: String,
    pub current_lap_parts: Option<DurationParts>,
    /// True right after a split, while the finished lap is held back
    pub in_quiet_period: bool,
    /// Most recently completed lap, hidden during the quiet period
    pub last_lap: Option<Lap>,
    pub last_lap_formatted: Option<String>,
    pub can_undo: bool,
    pub can_stop: bool,
}

/// Timers bound to stored activities.
///
/// The store owns the splits; this service only remembers which activities
/// are showing the end-of-effort summary.
pub struct TimerService {
    store: Arc<ActivityStore>,
    clock: Arc<dyn Clock>,
    quiet_period_ms: i64,
    reviewing: DashSet<String>,
    /// Serializes read-modify-write of stored activities
    transition: Mutex<()>,
}

impl TimerService {
    pub fn new(store: Arc<ActivityStore>, clock: Arc<dyn Clock>, quiet_period_ms: i64) -> Self {
        Self {
            store,
            clock,
            quiet_period_ms,
            reviewing: DashSet::new(),
            transition: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<ActivityStore> {
        &self.store
    }

    fn load(&self, id: &str) -> Result<SplitTimer> {
        let activity = self.store.get(id)?;
        Ok(SplitTimer::resume(activity, self.reviewing.contains(id)))
    }

    fn snapshot(&self, timer: &SplitTimer) -> TimerDisplay {
        timer.display(self.clock.now_millis(), self.quiet_period_ms)
    }

    /// Current display values for an activity.
    pub fn display(&self, id: &str) -> Result<TimerDisplay> {
        let timer = self.load(id)?;
        Ok(self.snapshot(&timer))
    }

    /// Start the activity or record a lap split.
    pub fn start(&self, id: &str) -> Result<TimerDisplay> {
        let _guard = self.transition.lock().unwrap_or_else(|e| e.into_inner());
        let mut timer = self.load(id)?;
        let was_started = timer.activity().is_started();

        if timer.start(self.clock.now_millis()) {
            self.store.update(timer.activity())?;
            if was_started {
                tracing::debug!(id, lap = timer.activity().lap_count(), "Lap split recorded");
            } else {
                tracing::info!(id, "Activity started");
            }
        }
        Ok(self.snapshot(&timer))
    }

    /// Remove the last split, if a completed lap exists.
    pub fn undo(&self, id: &str) -> Result<TimerDisplay> {
        let _guard = self.transition.lock().unwrap_or_else(|e| e.into_inner());
        let mut timer = self.load(id)?;

        if timer.undo() {
            self.store.update(timer.activity())?;
            tracing::debug!(id, splits = timer.activity().splits.len(), "Split undone");
        }
        Ok(self.snapshot(&timer))
    }

    /// Change the title without touching the splits.
    pub fn rename(&self, id: &str, title: &str) -> Result<Activity> {
        let _guard = self.transition.lock().unwrap_or_else(|e| e.into_inner());
        self.store.rename(id, title)
    }

    /// Show the end-of-effort summary.
    pub fn stop(&self, id: &str) -> Result<TimerDisplay> {
        let mut timer = self.load(id)?;
        if timer.stop() {
            self.reviewing.insert(id.to_string());
        }
        Ok(self.snapshot(&timer))
    }

    /// Dismiss the summary and return to the running timer.
    pub fn cancel(&self, id: &str) -> Result<TimerDisplay> {
        let mut timer = self.load(id)?;
        if timer.cancel() {
            self.reviewing.remove(id);
        }
        Ok(self.snapshot(&timer))
    }

    /// Leave the summary for the results list. Returns the activity as
    /// recorded and whether a review session was actually ended.
    pub fn finish(&self, id: &str) -> Result<(Activity, bool)> {
        let timer = self.load(id)?;
        let ended = timer.phase() == TimerPhase::Reviewing;
        if ended {
            self.reviewing.remove(id);
            tracing::info!(id, laps = timer.activity().lap_count(), "Effort ended");
        }
        Ok((timer.into_activity(), ended))
    }

    /// Drop any review state for a deleted activity.
    pub fn forget(&self, id: &str) {
        self.reviewing.remove(id);
    }
}
