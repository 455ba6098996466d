// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub const REGION_ID_MAX_LEN: usize = 32;
pub const NAME_MAX_LEN: usize = 64;
pub const SYNTHETIC_ID_PREFIX: &str = "TEMP_";

pub fn parse_region_id(input: &str) -> Result<RegionId, ValidationError> {
    RegionId::parse(input)
}

pub fn parse_region_name(input: &str) -> Result<RegionName, ValidationError> {
    RegionName::parse(input)
}

/// Region identifier as carried by the score table (`MUPL`, `MUFL`, ...) or
/// synthesized for unlabelled geometry features (`TEMP_00`, `TEMP_01`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct RegionId(String);

impl RegionId {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("region_id must not be empty".to_string()));
        }
        if input.len() > REGION_ID_MAX_LEN {
            return Err(ValidationError(format!(
                "region_id exceeds max length {REGION_ID_MAX_LEN}"
            )));
        }
        if !input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ValidationError(
                "region_id must match [A-Za-z0-9_-]+".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    /// Synthetic identifier for the feature at `position` in a collection of
    /// `total` features. Zero-padded so that lexicographic order equals
    /// positional order for the whole collection.
    #[must_use]
    pub fn synthetic(position: usize, total: usize) -> Self {
        let width = ordinal_width(total);
        Self(format!("{SYNTHETIC_ID_PREFIX}{position:0width$}"))
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.0.starts_with(SYNTHETIC_ID_PREFIX)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for RegionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn ordinal_width(total: usize) -> usize {
    let mut width = 2;
    let mut bound = 100;
    while total > bound {
        width += 1;
        bound = bound.saturating_mul(10);
    }
    width
}

/// Display name for a region. Falls back to the region identifier when the
/// score table does not supply one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
#[non_exhaustive]
pub struct RegionName(String);

impl RegionName {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("region_name must not be empty".to_string()));
        }
        if input.len() > NAME_MAX_LEN {
            return Err(ValidationError(format!(
                "region_name exceeds max length {NAME_MAX_LEN}"
            )));
        }
        if input.trim() != input {
            return Err(ValidationError(
                "region_name must not carry leading or trailing whitespace".to_string(),
            ));
        }
        if input.chars().any(char::is_control) {
            return Err(ValidationError(
                "region_name must not contain control characters".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for RegionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RegionId> for RegionName {
    fn from(id: RegionId) -> Self {
        Self(id.into_inner())
    }
}
