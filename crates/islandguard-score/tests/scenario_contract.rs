// SPDX-License-Identifier: Apache-2.0

use islandguard_model::{Category, MergedRegion, RegionId, RegionName};
use islandguard_score::{score_table, simulate_cyclone, summarize};
use serde_json::json;

fn merged(id: &str, position: usize, e: f64, v: f64, a: f64) -> MergedRegion {
    MergedRegion {
        region_id: RegionId::parse(id).expect("region id"),
        region_name: RegionName::parse(id).expect("region name"),
        feature_id: RegionId::synthetic(position, 3).into_inner(),
        position,
        geometry: json!({"type": "Polygon", "coordinates": []}),
        exposure: e,
        vulnerability: v,
        adaptation: a,
        population: Some(10_000),
    }
}

fn baseline() -> Vec<islandguard_model::ScoredRegion> {
    score_table(&[
        merged("MUAG", 0, 85.0, 40.0, 30.0),
        merged("MUBL", 1, 80.0, 60.0, 55.0),
        merged("MUFL", 2, 70.0, 55.0, 50.0),
    ])
}

#[test]
fn baseline_indices_match_the_worked_examples() {
    let scored = baseline();
    let indices: Vec<f64> = scored.iter().map(|s| s.score.resilience_index).collect();
    assert!((indices[0] - 53.75).abs() < 1e-9);
    assert!((indices[1] - 54.0).abs() < 1e-9);
    assert!((indices[2] - 59.25).abs() < 1e-9);
    assert!(scored.iter().all(|s| s.category() == Category::Medium));
}

#[test]
fn cyclone_at_intensity_fifty_downgrades_north_islands() {
    let scored = baseline();
    let comparison = simulate_cyclone(&scored, 50.0);

    let muag = &comparison.after[0];
    assert!((muag.region.exposure - 125.0).abs() < 1e-9);
    assert!((muag.score.resilience_index - 35.75).abs() < 1e-9);
    assert_eq!(muag.category(), Category::Low);

    // Before side is the untouched baseline.
    assert_eq!(comparison.before, scored);
}

#[test]
fn simulation_does_not_mutate_the_baseline_and_is_repeatable() {
    let scored = baseline();
    let snapshot = scored.clone();

    let first = simulate_cyclone(&scored, 50.0);
    let second = simulate_cyclone(&scored, 50.0);

    assert_eq!(scored, snapshot);
    assert_eq!(first, second);
}

#[test]
fn zero_intensity_is_a_no_op() {
    let scored = baseline();
    let comparison = simulate_cyclone(&scored, 0.0);
    assert_eq!(comparison.after, comparison.before);
}

#[test]
fn extreme_intensity_pushes_indices_negative_without_clamping() {
    let scored = baseline();
    let comparison = simulate_cyclone(&scored, 500.0);
    assert!(comparison
        .after
        .iter()
        .all(|s| s.score.resilience_index < 0.0));
    assert!(comparison
        .after
        .iter()
        .all(|s| s.category() == Category::Critical));
}

#[test]
fn summary_counts_bands_and_population_at_risk() {
    let scored = baseline();
    let stats = summarize(&scored);
    assert_eq!(stats.total_regions, 3);
    assert_eq!(stats.by_category[&Category::Medium], 3);
    assert_eq!(stats.by_category[&Category::Critical], 0);
    assert_eq!(stats.at_risk_regions, 0);
    assert!(stats.population_at_risk.is_none());

    let after = simulate_cyclone(&scored, 50.0).after;
    let stressed = summarize(&after);
    assert!(stressed.at_risk_regions > 0);
    assert_eq!(
        stressed.population_at_risk,
        Some(10_000 * stressed.at_risk_regions as u64)
    );
}

#[test]
fn empty_table_summarizes_without_a_mean() {
    let stats = summarize(&[]);
    assert_eq!(stats.total_regions, 0);
    assert!(stats.mean_resilience_index.is_none());
}
