// SPDX-License-Identifier: Apache-2.0

use crate::{AlertStore, StoreError, StoreErrorCode};
use islandguard_model::Alert;
use std::fs;
use std::path::PathBuf;

/// Alert store backed by a single JSON array file. A missing file reads as
/// an empty collection; every write goes through a temp file and rename so
/// a crashed writer never leaves a truncated store behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn write_alerts(&self, alerts: &[Alert]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
            }
        }
        let bytes = serde_json::to_vec_pretty(alerts)
            .map_err(|e| StoreError::new(StoreErrorCode::Serialization, e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        Ok(())
    }
}

impl AlertStore for JsonFileStore {
    fn append(&self, alert: Alert) -> Result<(), StoreError> {
        let mut alerts = self.read_all()?;
        alerts.push(alert);
        self.write_alerts(&alerts)
    }

    fn read_all(&self) -> Result<Vec<Alert>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::new(StoreErrorCode::Io, e.to_string())),
        };
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::new(StoreErrorCode::Serialization, e.to_string()))
    }

    fn replace_all(&self, alerts: Vec<Alert>) -> Result<(), StoreError> {
        self.write_alerts(&alerts)
    }
}
