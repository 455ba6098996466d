// SPDX-License-Identifier: Apache-2.0

use crate::{IngestError, IngestErrorCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// One geometry feature as the merger consumes it. The geometry value is
/// carried through opaquely; only the optional identifier and name are
/// lifted out of the properties.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedFeature {
    pub supplied_id: Option<String>,
    pub supplied_name: Option<String>,
    pub geometry: Value,
}

#[derive(Debug, Clone)]
pub struct DecodedFeatureCollection {
    pub features: Vec<DecodedFeature>,
    pub dropped_null_geometries: usize,
}

#[derive(Deserialize)]
struct RawFeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: Option<Map<String, Value>>,
    #[serde(default)]
    geometry: Value,
}

/// Decodes a GeoJSON feature collection. Features with a null geometry are
/// dropped (the count is reported, and the validator runs against the
/// post-drop list); anything that is not a feature collection fails.
pub fn decode_feature_collection(path: &Path) -> Result<DecodedFeatureCollection, IngestError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        IngestError::new(
            IngestErrorCode::Io,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    let collection: RawFeatureCollection = serde_json::from_str(&raw).map_err(|e| {
        IngestError::new(
            IngestErrorCode::Decode,
            format!("invalid GeoJSON in {}: {e}", path.display()),
        )
    })?;
    if collection.kind != "FeatureCollection" {
        return Err(IngestError::new(
            IngestErrorCode::Decode,
            format!(
                "expected a FeatureCollection, found type {:?}",
                collection.kind
            ),
        ));
    }

    let mut features = Vec::with_capacity(collection.features.len());
    let mut dropped_null_geometries = 0;
    for feature in collection.features {
        if feature.geometry.is_null() {
            dropped_null_geometries += 1;
            continue;
        }
        let properties = feature.properties.unwrap_or_default();
        features.push(DecodedFeature {
            supplied_id: string_property(&properties, "region_id"),
            supplied_name: string_property(&properties, "region_name"),
            geometry: feature.geometry,
        });
    }

    Ok(DecodedFeatureCollection {
        features,
        dropped_null_geometries,
    })
}

fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::decode_feature_collection;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn decodes_unlabelled_features_and_drops_null_geometries() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("regions.geojson");
        fs::write(
            &path,
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","properties":null,"geometry":{"type":"Point","coordinates":[57.5,-20.1]}},
                {"type":"Feature","properties":{"region_id":"MUPL","region_name":"Port Louis"},"geometry":{"type":"Point","coordinates":[57.5,-20.2]}},
                {"type":"Feature","properties":{},"geometry":null}
            ]}"#,
        )
        .expect("write geojson");

        let decoded = decode_feature_collection(&path).expect("decode");
        assert_eq!(decoded.features.len(), 2);
        assert_eq!(decoded.dropped_null_geometries, 1);
        assert!(decoded.features[0].supplied_id.is_none());
        assert_eq!(
            decoded.features[1].supplied_id.as_deref(),
            Some("MUPL")
        );
    }

    #[test]
    fn rejects_non_feature_collections() {
        let tmp = tempdir().expect("tempdir");
        let path = tmp.path().join("not_regions.geojson");
        fs::write(&path, r#"{"type":"Feature","geometry":null}"#).expect("write");
        let err = decode_feature_collection(&path).expect_err("must fail");
        assert!(err.message.contains("FeatureCollection"));
    }
}
