// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod alert;
mod category;
mod merged;
mod region;
mod score;

pub const CRATE_NAME: &str = "islandguard-model";

pub use alert::{Alert, AlertStatus, EvacuationEntry, GeoPoint};
pub use category::{Category, CATEGORY_CRITICAL_MAX, CATEGORY_LOW_MAX, CATEGORY_MEDIUM_MAX};
pub use merged::{MergedRegion, ResilienceScore, ScoredRegion};
pub use region::{
    parse_region_id, parse_region_name, RegionId, RegionName, ValidationError, NAME_MAX_LEN,
    REGION_ID_MAX_LEN, SYNTHETIC_ID_PREFIX,
};
pub use score::{ScoreRow, ScoreWeights};
