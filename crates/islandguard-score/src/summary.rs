// SPDX-License-Identifier: Apache-2.0

use islandguard_model::{Category, ScoredRegion};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Whole-table statistics for reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryStats {
    pub total_regions: usize,
    /// Region count per severity band; bands with no regions are present
    /// with a zero count so the breakdown is always complete.
    pub by_category: BTreeMap<Category, usize>,
    /// Regions in the Critical or Low band.
    pub at_risk_regions: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_resilience_index: Option<f64>,
    /// Sum of `population` over at-risk regions, when any region carries
    /// population data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_at_risk: Option<u64>,
}

#[must_use]
pub fn summarize(regions: &[ScoredRegion]) -> SummaryStats {
    let mut by_category: BTreeMap<Category, usize> = BTreeMap::new();
    for band in [
        Category::Critical,
        Category::Low,
        Category::Medium,
        Category::High,
    ] {
        by_category.insert(band, 0);
    }

    let mut index_sum = 0.0;
    let mut at_risk_regions = 0;
    let mut population_at_risk: Option<u64> = None;

    for scored in regions {
        *by_category.entry(scored.category()).or_insert(0) += 1;
        index_sum += scored.score.resilience_index;
        if scored.category().is_at_risk() {
            at_risk_regions += 1;
            if let Some(population) = scored.region.population {
                *population_at_risk.get_or_insert(0) += population;
            }
        }
    }

    let mean_resilience_index = if regions.is_empty() {
        None
    } else {
        Some(index_sum / regions.len() as f64)
    };

    SummaryStats {
        total_regions: regions.len(),
        by_category,
        at_risk_regions,
        mean_resilience_index,
        population_at_risk,
    }
}
