// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Split-Timer API Server
//!
//! Personal lap/interval timer: activities are sequences of split timestamps
//! kept in a durable slot on disk.

use split_timer::{
    config::Config,
    db::{FileSlot, SlotBackend},
    services::{ActivityStore, StyleCatalog, TimerService},
    time_utils::{Clock, SystemClock},
    AppState,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Split-Timer API");

    // Open the durable slot and watch it for writes from other processes
    let slot = Arc::new(FileSlot::open(&config.data_dir)?);
    let _watcher = slot
        .clone()
        .spawn_watcher(Duration::from_millis(config.slot_poll_ms));
    tracing::info!(
        dir = %config.data_dir.display(),
        poll_ms = config.slot_poll_ms,
        "Slot watcher started"
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slot: Arc<dyn SlotBackend> = slot;
    let store = Arc::new(ActivityStore::open(slot, &config.store_key, clock.clone())?);
    let _reloader = store.spawn_reload_on_change();

    let timers = TimerService::new(store.clone(), clock, config.quiet_period_ms);

    // Load the style catalog if configured
    let catalog = match (&config.style_spec_path, &config.styles_dir) {
        (Some(reference), Some(styles_dir)) => {
            tracing::info!(
                reference = %reference.display(),
                styles = %styles_dir.display(),
                "Loading style catalog"
            );
            StyleCatalog::load(reference, styles_dir)?
        }
        _ => {
            tracing::info!("Style catalog not configured");
            StyleCatalog::default()
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        timers,
        catalog,
    });

    // Build router
    let app = split_timer::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("split_timer=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
