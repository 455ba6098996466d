// SPDX-License-Identifier: Apache-2.0

use crate::{IngestError, IngestErrorCode};
use islandguard_model::{RegionId, RegionName, ScoreRow};
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Header and untyped records of a score table, exactly as read. Row order
/// is semantically significant: it is the positional join key.
#[derive(Debug, Clone, PartialEq)]
pub struct RawScoreTable {
    pub header: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// Reads a CSV score table. Quoted fields with embedded commas and doubled
/// quotes are handled; blank lines are skipped; each record must have the
/// header's width.
pub fn decode_score_table(path: &Path) -> Result<RawScoreTable, IngestError> {
    let file = fs::File::open(path).map_err(|e| {
        IngestError::new(
            IngestErrorCode::Io,
            format!("failed to read {}: {e}", path.display()),
        )
    })?;
    let reader = BufReader::new(file);

    let mut header: Option<Vec<String>> = None;
    let mut records = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| IngestError::new(IngestErrorCode::Io, e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(&line);
        match &header {
            None => header = Some(fields),
            Some(columns) => {
                if fields.len() != columns.len() {
                    return Err(IngestError::new(
                        IngestErrorCode::Decode,
                        format!(
                            "line {}: expected {} fields, found {}",
                            line_no + 1,
                            columns.len(),
                            fields.len()
                        ),
                    ));
                }
                records.push(fields);
            }
        }
    }

    let header = header.ok_or_else(|| {
        IngestError::new(
            IngestErrorCode::Decode,
            format!("{} has no header row", path.display()),
        )
    })?;
    Ok(RawScoreTable { header, records })
}

/// Converts validated raw records into typed rows. Assumes the schema
/// validator has already confirmed the required columns; numeric fields
/// that fail to parse are hard errors naming the row and column.
pub fn typed_rows(table: &RawScoreTable) -> Result<Vec<ScoreRow>, IngestError> {
    let region_id_col = column_index(table, "region_id")?;
    let exposure_col = column_index(table, "exposure")?;
    let vulnerability_col = column_index(table, "vulnerability")?;
    let adaptation_col = column_index(table, "adaptation")?;
    let region_name_col = optional_column_index(table, "region_name");
    let population_col = optional_column_index(table, "population");

    let mut rows = Vec::with_capacity(table.records.len());
    for (index, record) in table.records.iter().enumerate() {
        let row_no = index + 1;
        let region_id = RegionId::parse(record[region_id_col].trim()).map_err(|e| {
            IngestError::new(IngestErrorCode::Decode, format!("row {row_no}: {e}"))
        })?;
        let region_name = match region_name_col {
            Some(col) if !record[col].trim().is_empty() => {
                Some(RegionName::parse(record[col].trim()).map_err(|e| {
                    IngestError::new(IngestErrorCode::Decode, format!("row {row_no}: {e}"))
                })?)
            }
            _ => None,
        };
        let population = match population_col {
            Some(col) if !record[col].trim().is_empty() => {
                Some(record[col].trim().parse::<u64>().map_err(|_| {
                    IngestError::new(
                        IngestErrorCode::Decode,
                        format!(
                            "row {row_no}: population must be a non-negative integer, found {:?}",
                            record[col]
                        ),
                    )
                })?)
            }
            _ => None,
        };

        rows.push(ScoreRow {
            region_id,
            region_name,
            exposure: numeric_field(record, exposure_col, "exposure", row_no)?,
            vulnerability: numeric_field(record, vulnerability_col, "vulnerability", row_no)?,
            adaptation: numeric_field(record, adaptation_col, "adaptation", row_no)?,
            population,
        });
    }
    Ok(rows)
}

fn column_index(table: &RawScoreTable, name: &str) -> Result<usize, IngestError> {
    table
        .header
        .iter()
        .position(|c| c.trim() == name)
        .ok_or_else(|| {
            IngestError::new(
                IngestErrorCode::Internal,
                format!("column {name} absent after schema validation"),
            )
        })
}

fn optional_column_index(table: &RawScoreTable, name: &str) -> Option<usize> {
    table.header.iter().position(|c| c.trim() == name)
}

fn numeric_field(
    record: &[String],
    col: usize,
    name: &str,
    row_no: usize,
) -> Result<f64, IngestError> {
    record[col].trim().parse::<f64>().map_err(|_| {
        IngestError::new(
            IngestErrorCode::Decode,
            format!("row {row_no}: {name} must be numeric, found {:?}", record[col]),
        )
    })
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            other => field.push(other),
        }
    }
    fields.push(field);
    fields
}
