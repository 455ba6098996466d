// SPDX-License-Identifier: Apache-2.0

use crate::category::Category;
use crate::region::{RegionId, RegionName};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Union of a geometry feature and its positionally matched score row,
/// before scoring. Exactly one exists per input feature; the join is by
/// ordinal position only.
///
/// No `deny_unknown_fields` here: both structs are flattened into
/// [`ScoredRegion`] and must tolerate each other's keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRegion {
    /// Identifier from the score table; authoritative for all downstream
    /// cross-referencing.
    pub region_id: RegionId,
    pub region_name: RegionName,
    /// Identifier the geometry feature carried, or the synthetic token
    /// assigned to an unlabelled feature. Informational only; never used as
    /// a join key, so it stays a raw string.
    pub feature_id: String,
    /// 0-based position in both source collections.
    pub position: usize,
    /// Raw GeoJSON geometry, opaque to the scoring logic.
    pub geometry: Value,
    pub exposure: f64,
    pub vulnerability: f64,
    pub adaptation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

/// Derived output of the resilience formula for one region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResilienceScore {
    pub risk_composite: f64,
    /// `100 - risk_composite`, deliberately unclamped: inputs outside the
    /// nominal 0-100 range push the index outside [0,100] and that is a
    /// legitimate output, not an error.
    pub resilience_index: f64,
    pub category: Category,
}

/// One row of the region-indexed output table consumed by rendering and
/// reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRegion {
    #[serde(flatten)]
    pub region: MergedRegion,
    #[serde(flatten)]
    pub score: ResilienceScore,
}

impl ScoredRegion {
    #[must_use]
    pub fn region_id(&self) -> &RegionId {
        &self.region.region_id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.score.category
    }
}
