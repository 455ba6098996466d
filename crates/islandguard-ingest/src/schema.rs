// SPDX-License-Identifier: Apache-2.0

use crate::geojson::DecodedFeature;
use crate::table::RawScoreTable;
use std::fmt::{Display, Formatter};

/// Columns the score table must carry. `region_name` and `population` are
/// optional.
pub const REQUIRED_COLUMNS: [&str; 4] = ["region_id", "exposure", "vulnerability", "adaptation"];

/// Fail-fast boundary in front of the merger: no partial merge is ever
/// attempted on a failing input pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
    /// Every missing required column, not just the first one found.
    MissingColumns(Vec<String>),
    CountMismatch { features: usize, rows: usize },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumns(columns) => write!(
                f,
                "score table is missing required columns: {}",
                columns.join(", ")
            ),
            Self::CountMismatch { features, rows } => write!(
                f,
                "positional join impossible: {features} geometry features vs {rows} score rows"
            ),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Validates both shape requirements: required columns first, then the
/// feature/row count equality.
pub fn validate_inputs(
    features: &[DecodedFeature],
    table: &RawScoreTable,
) -> Result<(), SchemaError> {
    validate_columns(&table.header)?;
    validate_counts(features.len(), table.records.len())
}

pub fn validate_columns(header: &[String]) -> Result<(), SchemaError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !header.iter().any(|c| c.trim() == **required))
        .map(ToString::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(missing))
    }
}

pub fn validate_counts(features: usize, rows: usize) -> Result<(), SchemaError> {
    if features == rows {
        Ok(())
    } else {
        Err(SchemaError::CountMismatch { features, rows })
    }
}
