// SPDX-License-Identifier: Apache-2.0

use crate::{AlertStore, StoreError, StoreErrorCode};
use islandguard_model::Alert;
use std::sync::Mutex;

/// In-memory store for tests and fixtures.
#[derive(Debug, Default)]
pub struct MemoryStore {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_alerts(alerts: Vec<Alert>) -> Self {
        Self {
            alerts: Mutex::new(alerts),
        }
    }
}

impl AlertStore for MemoryStore {
    fn append(&self, alert: Alert) -> Result<(), StoreError> {
        self.alerts
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store mutex poisoned"))?
            .push(alert);
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self
            .alerts
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store mutex poisoned"))?
            .clone())
    }

    fn replace_all(&self, alerts: Vec<Alert>) -> Result<(), StoreError> {
        *self
            .alerts
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store mutex poisoned"))? =
            alerts;
        Ok(())
    }
}
