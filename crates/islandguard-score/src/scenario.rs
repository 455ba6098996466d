// SPDX-License-Identifier: Apache-2.0

use crate::score_region;
use islandguard_model::ScoredRegion;
use serde::{Deserialize, Serialize};

/// Additional exposure per unit of cyclone intensity.
pub const CYCLONE_IMPACT_FACTOR: f64 = 0.8;

/// Before/after pair produced by one simulation run. `before` is the
/// baseline exactly as supplied; `after` carries the perturbed exposure and
/// freshly computed scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub intensity: f64,
    pub before: Vec<ScoredRegion>,
    pub after: Vec<ScoredRegion>,
}

/// Applies a cyclone of the given intensity to every region of the baseline
/// and re-scores the result. The baseline is never mutated; vulnerability
/// and adaptation are held fixed, and neither the perturbed exposure nor the
/// resulting index is clamped.
#[must_use]
pub fn simulate_cyclone(baseline: &[ScoredRegion], intensity: f64) -> ScenarioComparison {
    let after = baseline
        .iter()
        .map(|scored| {
            let mut region = scored.region.clone();
            region.exposure += intensity * CYCLONE_IMPACT_FACTOR;
            score_region(&region)
        })
        .collect();

    ScenarioComparison {
        intensity,
        before: baseline.to_vec(),
        after,
    }
}
