// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod scenario;
mod summary;

use islandguard_model::{Category, MergedRegion, ResilienceScore, ScoreWeights, ScoredRegion};

pub const CRATE_NAME: &str = "islandguard-score";

pub use scenario::{simulate_cyclone, ScenarioComparison, CYCLONE_IMPACT_FACTOR};
pub use summary::{summarize, SummaryStats};

/// Composite risk and resilience index for one set of factor values.
///
/// `risk = 0.45*exposure + 0.35*vulnerability - 0.20*adaptation` and the
/// index is `100 - risk`. Pure and deterministic; nothing is clamped, so
/// out-of-range inputs legitimately push the index outside [0,100].
#[must_use]
pub fn score_components(
    weights: ScoreWeights,
    exposure: f64,
    vulnerability: f64,
    adaptation: f64,
) -> ResilienceScore {
    let risk_composite = weights.exposure * exposure + weights.vulnerability * vulnerability
        - weights.adaptation * adaptation;
    let resilience_index = 100.0 - risk_composite;
    ResilienceScore {
        risk_composite,
        resilience_index,
        category: Category::from_resilience_index(resilience_index),
    }
}

/// Scores one merged region with the default weights.
#[must_use]
pub fn score_region(region: &MergedRegion) -> ScoredRegion {
    score_region_with(ScoreWeights::DEFAULT, region)
}

#[must_use]
pub fn score_region_with(weights: ScoreWeights, region: &MergedRegion) -> ScoredRegion {
    let score = score_components(
        weights,
        region.exposure,
        region.vulnerability,
        region.adaptation,
    );
    ScoredRegion {
        region: region.clone(),
        score,
    }
}

/// Scores a whole merged table, preserving input order. Cheap enough to
/// recompute on every read; callers may memoize but never need to.
#[must_use]
pub fn score_table(regions: &[MergedRegion]) -> Vec<ScoredRegion> {
    regions.iter().map(score_region).collect()
}

#[cfg(test)]
mod tests {
    use super::score_components;
    use islandguard_model::{Category, ScoreWeights};

    #[test]
    fn worked_example_from_the_north_islands_row() {
        // E=85, V=40, A=30 -> risk 38.25+14-6 = 46.25 -> index 53.75.
        let score = score_components(ScoreWeights::DEFAULT, 85.0, 40.0, 30.0);
        assert!((score.risk_composite - 46.25).abs() < 1e-9);
        assert!((score.resilience_index - 53.75).abs() < 1e-9);
        assert_eq!(score.category, Category::Medium);
    }

    #[test]
    fn index_is_not_clamped() {
        let hot = score_components(ScoreWeights::DEFAULT, 300.0, 300.0, 0.0);
        assert!(hot.resilience_index < 0.0);
        assert_eq!(hot.category, Category::Critical);

        let calm = score_components(ScoreWeights::DEFAULT, 0.0, 0.0, 100.0);
        assert!(calm.resilience_index > 100.0);
        assert_eq!(calm.category, Category::High);
    }
}
