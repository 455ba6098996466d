// SPDX-License-Identifier: Apache-2.0

use chrono::{Duration, TimeZone, Utc};
use islandguard_alerts::{AlertStore, JsonFileStore, MemoryStore};
use islandguard_model::{Alert, AlertStatus, GeoPoint};
use std::fs;
use tempfile::tempdir;

fn alert_at(region: &str, status: AlertStatus, minutes_ago: i64) -> Alert {
    let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() - Duration::minutes(minutes_ago);
    Alert::new(region, status, ts, None)
}

#[test]
fn missing_file_reads_as_an_empty_collection() {
    let tmp = tempdir().expect("tempdir");
    let store = JsonFileStore::new(tmp.path().join("alerts.json"));
    assert!(store.read_all().expect("read").is_empty());
}

#[test]
fn append_read_clear_round_trips_through_the_file() {
    let tmp = tempdir().expect("tempdir");
    let store = JsonFileStore::new(tmp.path().join("data").join("alerts.json"));

    store
        .append(Alert::new(
            "MUPL",
            AlertStatus::InDanger,
            Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            Some(GeoPoint {
                lat: -20.16,
                lon: 57.5,
            }),
        ))
        .expect("append");
    store
        .append(alert_at("MUSA", AlertStatus::Safe, 5))
        .expect("append");

    let alerts = store.read_all().expect("read");
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].region_id, "MUPL");
    assert!(alerts[0].geolocation.is_some());

    store.clear().expect("clear");
    assert!(store.read_all().expect("read after clear").is_empty());
    // Clear leaves an empty array behind, not a missing file.
    let raw = fs::read_to_string(store.path()).expect("raw store");
    assert_eq!(serde_json::from_str::<Vec<Alert>>(&raw).expect("json").len(), 0);
}

#[test]
fn file_contents_survive_a_fresh_store_handle() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("alerts.json");

    JsonFileStore::new(path.clone())
        .append(alert_at("MUFL", AlertStatus::InDanger, 1))
        .expect("append");

    let reopened = JsonFileStore::new(path);
    assert_eq!(reopened.read_all().expect("read").len(), 1);
}

#[test]
fn pruning_drops_exactly_the_stale_alerts() {
    let store = MemoryStore::new();
    store
        .append(alert_at("MUPL", AlertStatus::InDanger, 60 * 30))
        .expect("append old");
    store
        .append(alert_at("MUSA", AlertStatus::Safe, 10))
        .expect("append fresh");
    store
        .append(alert_at("MUFL", AlertStatus::InDanger, 60 * 25))
        .expect("append old");

    let cutoff = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() - Duration::hours(24);
    let dropped = store.prune_older_than(cutoff).expect("prune");
    assert_eq!(dropped, 2);

    let remaining = store.read_all().expect("read");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].region_id, "MUSA");
}

#[test]
fn corrupt_store_file_surfaces_a_serialization_error() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("alerts.json");
    fs::write(&path, "{broken").expect("write corrupt file");

    let err = JsonFileStore::new(path).read_all().expect_err("must fail");
    assert_eq!(
        err.code,
        islandguard_alerts::StoreErrorCode::Serialization
    );
}
