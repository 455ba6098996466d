// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod aggregate;
mod json_store;
mod memory;

use chrono::{DateTime, Utc};
use islandguard_model::Alert;
use std::fmt::{Display, Formatter};

pub const CRATE_NAME: &str = "islandguard-alerts";

pub use aggregate::{aggregate, AlertSummary, RegionAlertStats};
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Io,
    Serialization,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Io => "io_error",
            Self::Serialization => "serialization_error",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// The alert collection as an explicitly owned, injectable store: the
/// aggregator never touches ambient state, and tests run against
/// [`MemoryStore`] fixtures. Single-writer session discipline is assumed;
/// no locking is provided.
pub trait AlertStore {
    fn append(&self, alert: Alert) -> Result<(), StoreError>;
    fn read_all(&self) -> Result<Vec<Alert>, StoreError>;
    fn replace_all(&self, alerts: Vec<Alert>) -> Result<(), StoreError>;

    /// Administrative clear: empties the collection atomically.
    fn clear(&self) -> Result<(), StoreError> {
        self.replace_all(Vec::new())
    }

    /// Drops alerts at or before the cutoff and reports how many were
    /// removed.
    fn prune_older_than(&self, cutoff: DateTime<Utc>) -> Result<usize, StoreError> {
        let alerts = self.read_all()?;
        let before = alerts.len();
        let retained: Vec<Alert> = alerts.into_iter().filter(|a| a.timestamp > cutoff).collect();
        let dropped = before - retained.len();
        self.replace_all(retained)?;
        Ok(dropped)
    }
}
