// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for timestamps and lap-time formatting.

use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicI64, Ordering};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Source of "now" in milliseconds since the epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. Used by tests and benchmarks.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(start_millis),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A lap time broken into the pieces the timer display styles separately.
///
/// `leading` is every digit of the whole-second count except the last,
/// `last` is the final digit, and `tenths` is the truncated tenth of a second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DurationParts {
    pub leading: String,
    pub last: String,
    pub tenths: u8,
}

impl DurationParts {
    /// Split a duration in milliseconds. NaN, infinite and negative input
    /// yields `None`.
    pub fn from_millis(millis: f64) -> Option<Self> {
        if !millis.is_finite() || millis < 0.0 {
            return None;
        }

        let seconds = (millis / 1000.0).floor();
        let tenths = ((millis % 1000.0) / 100.0).floor() as u8;

        let mut digits = format!("{}", seconds as u64);
        let last = digits.split_off(digits.len() - 1);

        Some(Self {
            leading: digits,
            last,
            tenths,
        })
    }
}

impl std::fmt::Display for DurationParts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}.{}", self.leading, self.last, self.tenths)
    }
}

/// Format a lap duration as whole seconds plus one truncated decimal place.
///
/// Invalid input (NaN, infinite, negative) formats as the empty string.
pub fn format_duration(millis: f64) -> String {
    DurationParts::from_millis(millis)
        .map(|parts| parts.to_string())
        .unwrap_or_default()
}

/// Format an integer millisecond duration.
pub fn format_millis(millis: i64) -> String {
    format_duration(millis as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_nan_is_empty() {
        assert_eq!(format_duration(f64::NAN), "");
        assert_eq!(format_duration(f64::INFINITY), "");
        assert_eq!(format_duration(-1.0), "");
    }

    #[test]
    fn test_format_truncates_tenths() {
        assert_eq!(format_duration(1234.0), "1.2");
        assert_eq!(format_duration(999.0), "0.9");
        assert_eq!(format_duration(1999.9), "1.9");
        assert_eq!(format_millis(0), "0.0");
        assert_eq!(format_millis(62_050), "62.0");
    }

    #[test]
    fn test_parts_split_last_digit() {
        let parts = DurationParts::from_millis(123_456.0).unwrap();
        assert_eq!(parts.leading, "12");
        assert_eq!(parts.last, "3");
        assert_eq!(parts.tenths, 4);

        let parts = DurationParts::from_millis(999.0).unwrap();
        assert_eq!(parts.leading, "");
        assert_eq!(parts.last, "0");
        assert_eq!(parts.tenths, 9);
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance(500);
        assert_eq!(clock.now_millis(), 1_500);
        clock.set(42);
        assert_eq!(clock.now_millis(), 42);
    }
}
