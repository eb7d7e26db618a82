// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod style;

pub use activity::{Activity, Lap};
pub use style::{ManifestEntry, PropertyKind, StyleEntry, StyleProperty};
