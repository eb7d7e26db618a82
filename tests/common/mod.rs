// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, Response};
use split_timer::config::Config;
use split_timer::db::{MemorySlot, SlotBackend};
use split_timer::routes::create_router;
use split_timer::services::{ActivityStore, StyleCatalog, TimerService};
use split_timer::time_utils::{Clock, ManualClock};
use split_timer::AppState;
use std::sync::Arc;

/// Start of time for tests (2024-01-01T00:00:00Z in ms).
#[allow(dead_code)]
pub const T0: i64 = 1_704_067_200_000;

/// A router over an in-memory slot with a hand-driven clock.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub slot: Arc<MemorySlot>,
    pub clock: Arc<ManualClock>,
}

/// Build a store over a fresh in-memory slot.
#[allow(dead_code)]
pub fn test_store() -> (Arc<ActivityStore>, Arc<MemorySlot>, Arc<ManualClock>) {
    let slot = Arc::new(MemorySlot::new());
    let clock = Arc::new(ManualClock::new(T0));
    let store = open_store(&slot, &clock);
    (store, slot, clock)
}

/// Open a store over an existing slot (simulates a process restart).
#[allow(dead_code)]
pub fn open_store(slot: &Arc<MemorySlot>, clock: &Arc<ManualClock>) -> Arc<ActivityStore> {
    let backend: Arc<dyn SlotBackend> = slot.clone();
    let clock: Arc<dyn Clock> = clock.clone();
    Arc::new(ActivityStore::open(backend, "activities", clock).expect("store should open"))
}

/// Create a test app with offline in-memory dependencies.
#[allow(dead_code)]
pub fn create_test_app() -> TestApp {
    let config = Config::test_default();
    let (store, slot, clock) = test_store();
    let timer_clock: Arc<dyn Clock> = clock.clone();
    let timers = TimerService::new(store.clone(), timer_clock, config.quiet_period_ms);

    let state = Arc::new(AppState {
        config,
        store,
        timers,
        catalog: StyleCatalog::default(),
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        slot,
        clock,
    }
}

/// Build a request with an empty body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
