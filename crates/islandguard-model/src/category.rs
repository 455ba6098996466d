// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const CATEGORY_CRITICAL_MAX: f64 = 30.0;
pub const CATEGORY_LOW_MAX: f64 = 50.0;
pub const CATEGORY_MEDIUM_MAX: f64 = 70.0;

/// Severity band for a resilience index, ordered by ascending resilience.
///
/// Bands are closed-open on the index: anything below 30 (including negative
/// indices from extreme scenarios) is `Critical`; 70 and above is `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum Category {
    Critical,
    Low,
    Medium,
    High,
}

impl Category {
    #[must_use]
    pub fn from_resilience_index(index: f64) -> Self {
        if index < CATEGORY_CRITICAL_MAX {
            Self::Critical
        } else if index < CATEGORY_LOW_MAX {
            Self::Low
        } else if index < CATEGORY_MEDIUM_MAX {
            Self::Medium
        } else {
            Self::High
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }

    /// Choropleth color for rendering collaborators.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Critical => "#d73027",
            Self::Low => "#fc8d59",
            Self::Medium => "#fee08b",
            Self::High => "#1a9850",
        }
    }

    /// Regions in the two lowest bands count as at-risk for summary
    /// statistics and alert messaging.
    #[must_use]
    pub const fn is_at_risk(self) -> bool {
        matches!(self, Self::Critical | Self::Low)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
