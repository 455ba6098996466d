// SPDX-License-Identifier: Apache-2.0

use chrono::{Duration, TimeZone, Utc};
use islandguard_alerts::aggregate;
use islandguard_model::{Alert, AlertStatus, RegionId};
use std::collections::BTreeSet;

fn known(ids: &[&str]) -> BTreeSet<RegionId> {
    ids.iter()
        .map(|id| RegionId::parse(id).expect("region id"))
        .collect()
}

fn alerts(entries: &[(&str, AlertStatus)]) -> Vec<Alert> {
    let base = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
    entries
        .iter()
        .enumerate()
        .map(|(i, (region, status))| {
            Alert::new(region, *status, base + Duration::seconds(i as i64), None)
        })
        .collect()
}

#[test]
fn evacuation_ranking_breaks_ties_by_ascending_region_id() {
    let store = alerts(&[
        ("A", AlertStatus::InDanger),
        ("B", AlertStatus::InDanger),
        ("A", AlertStatus::InDanger),
        ("C", AlertStatus::InDanger),
        ("B", AlertStatus::InDanger),
        ("A", AlertStatus::InDanger),
        ("B", AlertStatus::InDanger),
    ]);
    let summary = aggregate(&store, &known(&["A", "B", "C"]));

    let ranked: Vec<(&str, u64, u32)> = summary
        .evacuation
        .iter()
        .map(|e| (e.region_id.as_str(), e.danger_count, e.priority))
        .collect();
    assert_eq!(ranked, [("A", 3, 1), ("B", 3, 2), ("C", 1, 3)]);
}

#[test]
fn safe_alerts_never_reach_the_evacuation_list() {
    let store = alerts(&[
        ("MUPL", AlertStatus::Safe),
        ("MUPL", AlertStatus::Safe),
        ("MUSA", AlertStatus::InDanger),
    ]);
    let summary = aggregate(&store, &known(&["MUPL", "MUSA"]));

    assert_eq!(summary.evacuation.len(), 1);
    assert_eq!(summary.evacuation[0].region_id.as_str(), "MUSA");

    let mupl = &summary.per_region[&RegionId::parse("MUPL").unwrap()];
    assert_eq!(mupl.safe_count, 2);
    assert_eq!(mupl.danger_count, 0);
    assert!((mupl.danger_ratio - 0.0).abs() < f64::EPSILON);
}

#[test]
fn unknown_region_references_are_tallied_not_fatal() {
    let store = alerts(&[
        ("MUPL", AlertStatus::InDanger),
        ("ATLANTIS", AlertStatus::InDanger),
        ("ATLANTIS", AlertStatus::Safe),
    ]);
    let summary = aggregate(&store, &known(&["MUPL"]));

    assert_eq!(summary.unknown_region_alerts, 2);
    assert_eq!(summary.evacuation.len(), 1);
    assert_eq!(summary.evacuation[0].region_id.as_str(), "MUPL");
    assert!(!summary
        .per_region
        .keys()
        .any(|id| id.as_str() == "ATLANTIS"));
}

#[test]
fn known_regions_without_alerts_appear_with_zero_counts() {
    let summary = aggregate(&[], &known(&["MUPL", "MUSA"]));
    assert_eq!(summary.per_region.len(), 2);
    assert!(summary
        .per_region
        .values()
        .all(|stats| stats.total_count == 0));
    assert!(summary.evacuation.is_empty());
    assert_eq!(summary.unknown_region_alerts, 0);
}

#[test]
fn danger_ratio_reflects_the_mix() {
    let store = alerts(&[
        ("MUPL", AlertStatus::InDanger),
        ("MUPL", AlertStatus::InDanger),
        ("MUPL", AlertStatus::Safe),
        ("MUPL", AlertStatus::Safe),
    ]);
    let summary = aggregate(&store, &known(&["MUPL"]));
    let stats = &summary.per_region[&RegionId::parse("MUPL").unwrap()];
    assert!((stats.danger_ratio - 0.5).abs() < 1e-9);
}

#[test]
fn lookups_stay_exact_over_a_large_region_set() {
    let ids: Vec<String> = (0..200).map(|i| format!("MU{i:03}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let regions = known(&id_refs);

    // First, last, and a region the table does not know.
    let store = alerts(&[
        ("MU000", AlertStatus::InDanger),
        ("MU199", AlertStatus::InDanger),
        ("MU199", AlertStatus::Safe),
        ("MU200", AlertStatus::InDanger),
    ]);
    let summary = aggregate(&store, &regions);

    assert_eq!(summary.per_region.len(), 200);
    let first = &summary.per_region[&RegionId::parse("MU000").unwrap()];
    assert_eq!(first.danger_count, 1);
    let last = &summary.per_region[&RegionId::parse("MU199").unwrap()];
    assert_eq!(last.danger_count, 1);
    assert_eq!(last.safe_count, 1);
    assert_eq!(summary.unknown_region_alerts, 1);
}

#[test]
fn aggregation_is_reproducible_for_the_same_input_set() {
    let store = alerts(&[
        ("B", AlertStatus::InDanger),
        ("A", AlertStatus::InDanger),
        ("C", AlertStatus::Safe),
    ]);
    let regions = known(&["A", "B", "C"]);
    assert_eq!(aggregate(&store, &regions), aggregate(&store, &regions));
}
