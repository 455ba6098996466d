// SPDX-License-Identifier: Apache-2.0

use crate::geojson::DecodedFeature;
use islandguard_model::{MergedRegion, RegionId, RegionName, ScoreRow};

/// Joins geometry features to score rows strictly by ordinal position:
/// feature *i* pairs with row *i*, never by matching identifiers, even when
/// both sides carry identifier-like fields. The score table's `region_id`
/// is authoritative in the merged record; whatever the feature carried (or
/// the synthetic token assigned to an unlabelled feature) is kept as
/// `feature_id` for traceability only.
///
/// Callers must have run the schema validator first; by then both sides
/// have equal length. Zero features merge to an empty table.
#[must_use]
pub fn merge_by_position(features: &[DecodedFeature], rows: &[ScoreRow]) -> Vec<MergedRegion> {
    debug_assert_eq!(features.len(), rows.len(), "validator must run before merge");

    let total = features.len();
    features
        .iter()
        .zip(rows)
        .enumerate()
        .map(|(position, (feature, row))| {
            let feature_id = feature
                .supplied_id
                .clone()
                .unwrap_or_else(|| RegionId::synthetic(position, total).into_inner());
            let region_name = row
                .region_name
                .clone()
                .unwrap_or_else(|| RegionName::from(row.region_id.clone()));
            MergedRegion {
                region_id: row.region_id.clone(),
                region_name,
                feature_id,
                position,
                geometry: feature.geometry.clone(),
                exposure: row.exposure,
                vulnerability: row.vulnerability,
                adaptation: row.adaptation,
                population: row.population,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::merge_by_position;
    use crate::geojson::DecodedFeature;
    use islandguard_model::{RegionId, ScoreRow};
    use serde_json::json;

    fn feature(id: Option<&str>) -> DecodedFeature {
        DecodedFeature {
            supplied_id: id.map(ToString::to_string),
            supplied_name: None,
            geometry: json!({"type": "Point", "coordinates": [57.5, -20.1]}),
        }
    }

    fn row(id: &str, exposure: f64) -> ScoreRow {
        ScoreRow {
            region_id: RegionId::parse(id).expect("region id"),
            region_name: None,
            exposure,
            vulnerability: 50.0,
            adaptation: 50.0,
            population: None,
        }
    }

    #[test]
    fn geometry_identifiers_never_win_over_the_row() {
        // The feature claims to be MUFL; position says row 0 (MUAG).
        let merged = merge_by_position(&[feature(Some("MUFL"))], &[row("MUAG", 85.0)]);
        assert_eq!(merged[0].region_id.as_str(), "MUAG");
        assert_eq!(merged[0].feature_id, "MUFL");
    }

    #[test]
    fn unlabelled_features_get_ordered_synthetic_tokens() {
        let merged = merge_by_position(
            &[feature(None), feature(None)],
            &[row("MUAG", 85.0), row("MUBL", 80.0)],
        );
        assert_eq!(merged[0].feature_id, "TEMP_00");
        assert_eq!(merged[1].feature_id, "TEMP_01");
        assert_eq!(merged[0].position, 0);
        assert_eq!(merged[1].position, 1);
    }

    #[test]
    fn empty_inputs_merge_to_an_empty_table() {
        assert!(merge_by_position(&[], &[]).is_empty());
    }
}
