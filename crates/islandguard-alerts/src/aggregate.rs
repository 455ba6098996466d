// SPDX-License-Identifier: Apache-2.0

use islandguard_model::{Alert, AlertStatus, EvacuationEntry, RegionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionAlertStats {
    pub danger_count: u64,
    pub safe_count: u64,
    pub total_count: u64,
    pub danger_ratio: f64,
}

/// One aggregation pass over the alert collection. Recomputed on every
/// query; never persisted as authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertSummary {
    /// Stats for every known region, zeroed when it has no alerts.
    pub per_region: BTreeMap<RegionId, RegionAlertStats>,
    /// Regions with at least one danger alert, ranked by descending danger
    /// count, ties broken by ascending region identifier.
    pub evacuation: Vec<EvacuationEntry>,
    /// Alerts referencing a region the merged table does not know. Alerts
    /// are untrusted citizen input, so this is a tally, not an error.
    pub unknown_region_alerts: u64,
}

#[must_use]
pub fn aggregate(alerts: &[Alert], known_regions: &BTreeSet<RegionId>) -> AlertSummary {
    let mut per_region: BTreeMap<RegionId, RegionAlertStats> = known_regions
        .iter()
        .map(|id| (id.clone(), RegionAlertStats::default()))
        .collect();
    // One lookup table up front; alert region references are raw strings.
    let ids_by_str: BTreeMap<&str, &RegionId> = known_regions
        .iter()
        .map(|id| (id.as_str(), id))
        .collect();
    let mut unknown_region_alerts = 0;

    for alert in alerts {
        let Some(region_id) = ids_by_str.get(alert.region_id.as_str()).copied() else {
            unknown_region_alerts += 1;
            continue;
        };
        let stats = per_region.entry(region_id.clone()).or_default();
        match alert.status {
            AlertStatus::InDanger => stats.danger_count += 1,
            AlertStatus::Safe => stats.safe_count += 1,
        }
        stats.total_count += 1;
    }

    for stats in per_region.values_mut() {
        if stats.total_count > 0 {
            stats.danger_ratio = stats.danger_count as f64 / stats.total_count as f64;
        }
    }

    // BTreeMap iteration is already ascending by id, so a stable sort on the
    // danger count alone yields the full deterministic order.
    let mut ranked: Vec<(RegionId, u64)> = per_region
        .iter()
        .filter(|(_, stats)| stats.danger_count > 0)
        .map(|(id, stats)| (id.clone(), stats.danger_count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let evacuation = ranked
        .into_iter()
        .enumerate()
        .map(|(index, (region_id, danger_count))| EvacuationEntry {
            region_id,
            danger_count,
            priority: index as u32 + 1,
        })
        .collect();

    AlertSummary {
        per_region,
        evacuation,
        unknown_region_alerts,
    }
}
