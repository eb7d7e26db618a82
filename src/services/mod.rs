// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod manifest;
pub mod share;
pub mod store;
pub mod timer;

pub use catalog::{CatalogError, StyleCatalog};
pub use manifest::ManifestError;
pub use store::ActivityStore;
pub use timer::{SplitTimer, TimerDisplay, TimerPhase, TimerService};
