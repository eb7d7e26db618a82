// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity store over the on-disk slot.

use split_timer::db::{FileSlot, SlotBackend};
use split_timer::models::Activity;
use split_timer::services::ActivityStore;
use split_timer::time_utils::{Clock, ManualClock};
use std::fs;
use std::sync::Arc;
use std::time::Duration;

const T0: i64 = 1_704_067_200_000;

fn open(dir: &std::path::Path) -> (Arc<FileSlot>, Arc<ActivityStore>) {
    let slot = Arc::new(FileSlot::open(dir).expect("slot should open"));
    let backend: Arc<dyn SlotBackend> = slot.clone();
    let clock: Arc<dyn Clock> = Arc::new(ManualClock::new(T0));
    let store = Arc::new(ActivityStore::open(backend, "activities", clock).unwrap());
    (slot, store)
}

#[test]
fn test_collection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (_slot, store) = open(dir.path());
    let mut activity = store.create().unwrap();
    activity.splits = vec![T0, T0 + 61_000];
    store.update(&activity).unwrap();
    drop(store);

    let (_slot, store) = open(dir.path());
    assert_eq!(store.list(), vec![activity]);
}

#[test]
fn test_corrupt_file_resets_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("activities.json"), "[{\"id\": 1").unwrap();

    let (_slot, store) = open(dir.path());
    assert!(store.list().is_empty());
}

#[tokio::test]
async fn test_write_from_other_process_is_reloaded() {
    let dir = tempfile::tempdir().unwrap();
    let (slot, store) = open(dir.path());
    let _reloader = store.spawn_reload_on_change();
    let _watcher = slot.clone().spawn_watcher(Duration::from_millis(10));

    store.create().unwrap();

    // Another process replaces the file
    let other = Activity::new("other-process".to_string(), T0 + 5);
    fs::write(
        slot.path_for("activities"),
        serde_json::to_string(&vec![&other]).unwrap(),
    )
    .unwrap();

    let mut reloaded = false;
    for _ in 0..100 {
        if store.list() == vec![other.clone()] {
            reloaded = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(reloaded, "store should pick up the external write");
}
