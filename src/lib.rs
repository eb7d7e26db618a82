// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Split-Timer: a personal lap/interval timer
//!
//! This crate provides the backend for timing activities as a sequence of
//! split timestamps, persisting them to a durable slot and keeping the
//! in-memory copy in step with other writers.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ActivityStore, StyleCatalog, TimerService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<ActivityStore>,
    pub timers: TimerService,
    pub catalog: StyleCatalog,
}
