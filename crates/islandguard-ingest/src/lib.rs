// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod geojson;
mod logging;
mod merge;
mod schema;
mod table;
mod write;

use islandguard_model::ScoredRegion;
use islandguard_score::score_table;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const CRATE_NAME: &str = "islandguard-ingest";

pub use geojson::{decode_feature_collection, DecodedFeature, DecodedFeatureCollection};
pub use logging::{IngestEvent, IngestLog, IngestStage};
pub use merge::merge_by_position;
pub use schema::{
    validate_columns, validate_counts, validate_inputs, SchemaError, REQUIRED_COLUMNS,
};
pub use table::{decode_score_table, typed_rows, RawScoreTable};
pub use write::{write_scored_artifact, ScoredArtifact, ARTIFACT_FILE_NAME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestErrorCode {
    Io,
    Decode,
    Schema,
    Internal,
}

impl IngestErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "io_error",
            Self::Decode => "decode_error",
            Self::Schema => "schema_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestError {
    pub code: IngestErrorCode,
    pub message: String,
}

impl IngestError {
    #[must_use]
    pub fn new(code: IngestErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for IngestError {}

impl From<SchemaError> for IngestError {
    fn from(value: SchemaError) -> Self {
        Self::new(IngestErrorCode::Schema, value.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub geojson_path: PathBuf,
    pub scores_path: PathBuf,
    /// When set, the scored table is persisted under this directory as
    /// canonical JSON with a sha256 sidecar.
    pub output_root: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct IngestResult {
    /// The region-indexed output table, in source order.
    pub regions: Vec<ScoredRegion>,
    /// Decoded geometry feature count. Exposed prominently together with
    /// `row_count` so integrators can self-check source ordering: the
    /// positional join cannot detect misaligned sources of equal length.
    pub feature_count: usize,
    pub row_count: usize,
    /// Features discarded at decode time for carrying a null geometry.
    pub dropped_null_geometries: usize,
    pub artifact_path: Option<PathBuf>,
    pub artifact_sha256: Option<String>,
    pub events: Vec<IngestEvent>,
}

/// Runs the full pipeline: decode both sources, validate their shape, merge
/// by position, score, and optionally persist the scored table.
pub fn ingest_dataset(opts: &IngestOptions) -> Result<IngestResult, IngestError> {
    let mut log = logging::IngestLog::default();
    log.emit(IngestStage::Decode, "ingest.start", BTreeMap::new());

    let decoded_features = geojson::decode_feature_collection(&opts.geojson_path)?;
    let raw_table = table::decode_score_table(&opts.scores_path)?;
    log.emit(
        IngestStage::Decode,
        "ingest.decode.complete",
        BTreeMap::from([
            (
                "features".to_string(),
                decoded_features.features.len().to_string(),
            ),
            ("rows".to_string(), raw_table.records.len().to_string()),
            (
                "dropped_null_geometries".to_string(),
                decoded_features.dropped_null_geometries.to_string(),
            ),
        ]),
    );

    schema::validate_inputs(&decoded_features.features, &raw_table)?;
    log.emit(IngestStage::Validate, "ingest.schema.ok", BTreeMap::new());

    let rows = table::typed_rows(&raw_table)?;
    let merged = merge::merge_by_position(&decoded_features.features, &rows);
    log.emit(
        IngestStage::Merge,
        "ingest.merge.complete",
        BTreeMap::from([("merged".to_string(), merged.len().to_string())]),
    );

    let regions = score_table(&merged);
    log.emit(IngestStage::Score, "ingest.score.complete", BTreeMap::new());

    let mut artifact_path = None;
    let mut artifact_sha256 = None;
    if let Some(output_root) = &opts.output_root {
        let artifact = write::write_scored_artifact(output_root, &regions)?;
        log.emit(
            IngestStage::Persist,
            "ingest.persist.complete",
            BTreeMap::from([("sha256".to_string(), artifact.sha256.clone())]),
        );
        artifact_path = Some(artifact.path);
        artifact_sha256 = Some(artifact.sha256);
    }

    Ok(IngestResult {
        feature_count: decoded_features.features.len(),
        row_count: rows.len(),
        dropped_null_geometries: decoded_features.dropped_null_geometries,
        regions,
        artifact_path,
        artifact_sha256,
        events: log.into_events(),
    })
}
