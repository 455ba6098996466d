// SPDX-License-Identifier: Apache-2.0

use crate::region::{RegionId, RegionName};
use serde::{Deserialize, Serialize};

/// One row of the score table. `exposure`, `vulnerability` and `adaptation`
/// are nominally 0-100 but the pipeline does not enforce the range; only
/// presence is validated at the schema boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreRow {
    pub region_id: RegionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_name: Option<RegionName>,
    pub exposure: f64,
    pub vulnerability: f64,
    pub adaptation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<u64>,
}

impl ScoreRow {
    /// Display name, falling back to the identifier when the table supplies
    /// none.
    #[must_use]
    pub fn display_name(&self) -> RegionName {
        self.region_name
            .clone()
            .unwrap_or_else(|| RegionName::from(self.region_id.clone()))
    }
}

/// Weights of the composite risk formula. Adaptation is subtractive: higher
/// adaptation lowers risk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreWeights {
    pub exposure: f64,
    pub vulnerability: f64,
    pub adaptation: f64,
}

impl ScoreWeights {
    pub const DEFAULT: Self = Self {
        exposure: 0.45,
        vulnerability: 0.35,
        adaptation: 0.20,
    };
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}
