// SPDX-License-Identifier: Apache-2.0

use crate::region::RegionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    InDanger,
    Safe,
}

impl AlertStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InDanger => "IN_DANGER",
            Self::Safe => "SAFE",
        }
    }
}

impl Display for AlertStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// A citizen-submitted report. Append-only, externally generated, never
/// edited in place.
///
/// `region_id` stays a raw string: alerts are untrusted input and may
/// reference regions the merged table does not know; the aggregator
/// tolerates that instead of rejecting the record at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alert {
    pub id: String,
    pub region_id: String,
    pub status: AlertStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geolocation: Option<GeoPoint>,
}

impl Alert {
    /// Alert with the conventional `<region_id>_<unix_millis>` identifier.
    #[must_use]
    pub fn new(
        region_id: &str,
        status: AlertStatus,
        timestamp: DateTime<Utc>,
        geolocation: Option<GeoPoint>,
    ) -> Self {
        Self {
            id: format!("{region_id}_{}", timestamp.timestamp_millis()),
            region_id: region_id.to_string(),
            status,
            timestamp,
            geolocation,
        }
    }
}

/// One entry of the evacuation priority list. Derived on every aggregation
/// pass, never persisted as authoritative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvacuationEntry {
    pub region_id: RegionId,
    pub danger_count: u64,
    /// 1-based rank: descending danger count, ties broken by ascending
    /// region identifier.
    pub priority: u32,
}

#[cfg(test)]
mod tests {
    use super::{Alert, AlertStatus};
    use chrono::{TimeZone, Utc};

    #[test]
    fn status_serializes_in_screaming_snake_case() {
        let danger = serde_json::to_string(&AlertStatus::InDanger).expect("serialize");
        assert_eq!(danger, "\"IN_DANGER\"");
        let safe = serde_json::to_string(&AlertStatus::Safe).expect("serialize");
        assert_eq!(safe, "\"SAFE\"");
    }

    #[test]
    fn alert_id_embeds_region_and_millis() {
        let ts = Utc.with_ymd_and_hms(2025, 1, 15, 8, 30, 0).unwrap();
        let alert = Alert::new("MUPL", AlertStatus::InDanger, ts, None);
        assert_eq!(alert.id, format!("MUPL_{}", ts.timestamp_millis()));
        assert_eq!(alert.region_id, "MUPL");
    }
}
