// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod offline;
mod prompt;

use islandguard_core::{ENV_ISLANDGUARD_ADVISORY_KEY, ENV_ISLANDGUARD_ADVISORY_URL};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const CRATE_NAME: &str = "islandguard-advisory";

pub use offline::offline_advisory;
pub use prompt::{build_prompt, AdvisoryContext};

/// The advisory service is optional infrastructure: every failure here is
/// recoverable and the caller degrades to the offline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AdvisoryErrorCode {
    Config,
    Network,
    Protocol,
}

impl AdvisoryErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "advisory_config",
            Self::Network => "advisory_network",
            Self::Protocol => "advisory_protocol",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryError {
    pub code: AdvisoryErrorCode,
    pub message: String,
}

impl AdvisoryError {
    #[must_use]
    pub fn new(code: AdvisoryErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for AdvisoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AdvisoryError {}

/// Generates advisory text for one region context. The response is opaque:
/// the pipeline renders it as-is and never parses it as a computed value.
pub trait AdvisoryClient {
    fn advise(&self, context: &AdvisoryContext) -> Result<String, AdvisoryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl AdvisoryConfig {
    /// Resolution from explicit values, so tests never mutate the process
    /// environment.
    pub fn from_values(
        endpoint: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, AdvisoryError> {
        let endpoint = non_empty(endpoint).ok_or_else(|| {
            AdvisoryError::new(
                AdvisoryErrorCode::Config,
                format!("{ENV_ISLANDGUARD_ADVISORY_URL} is not set"),
            )
        })?;
        let api_key = non_empty(api_key).ok_or_else(|| {
            AdvisoryError::new(
                AdvisoryErrorCode::Config,
                format!("{ENV_ISLANDGUARD_ADVISORY_KEY} is not set"),
            )
        })?;
        Ok(Self { endpoint, api_key })
    }

    pub fn from_env() -> Result<Self, AdvisoryError> {
        Self::from_values(
            std::env::var(ENV_ISLANDGUARD_ADVISORY_URL).ok(),
            std::env::var(ENV_ISLANDGUARD_ADVISORY_KEY).ok(),
        )
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim().to_string();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    })
}

#[derive(Debug, Serialize)]
struct AdvisoryRequestBody<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdvisoryResponseBody {
    text: String,
}

/// Blocking HTTP client for the generative-text service.
pub struct HttpAdvisoryClient {
    config: AdvisoryConfig,
    client: reqwest::blocking::Client,
}

impl HttpAdvisoryClient {
    pub fn new(config: AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AdvisoryError::new(AdvisoryErrorCode::Config, e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, AdvisoryError> {
        Self::new(AdvisoryConfig::from_env()?)
    }
}

impl AdvisoryClient for HttpAdvisoryClient {
    fn advise(&self, context: &AdvisoryContext) -> Result<String, AdvisoryError> {
        let prompt = build_prompt(context);
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&AdvisoryRequestBody { prompt: &prompt })
            .send()
            .map_err(|e| AdvisoryError::new(AdvisoryErrorCode::Network, e.to_string()))?;

        if !response.status().is_success() {
            return Err(AdvisoryError::new(
                AdvisoryErrorCode::Protocol,
                format!("advisory service returned {}", response.status()),
            ));
        }

        let body: AdvisoryResponseBody = response
            .json()
            .map_err(|e| AdvisoryError::new(AdvisoryErrorCode::Protocol, e.to_string()))?;
        if body.text.trim().is_empty() {
            return Err(AdvisoryError::new(
                AdvisoryErrorCode::Protocol,
                "advisory service returned empty text",
            ));
        }
        Ok(body.text)
    }
}

#[cfg(test)]
mod tests {
    use super::{AdvisoryConfig, AdvisoryErrorCode};

    #[test]
    fn config_requires_both_endpoint_and_key() {
        let err = AdvisoryConfig::from_values(None, Some("key".to_string())).expect_err("endpoint");
        assert_eq!(err.code, AdvisoryErrorCode::Config);

        let err = AdvisoryConfig::from_values(Some("https://ai.example".to_string()), None)
            .expect_err("key");
        assert_eq!(err.code, AdvisoryErrorCode::Config);

        let ok = AdvisoryConfig::from_values(
            Some("https://ai.example".to_string()),
            Some("key".to_string()),
        )
        .expect("config");
        assert_eq!(ok.endpoint, "https://ai.example");
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert!(
            AdvisoryConfig::from_values(Some("  ".to_string()), Some("key".to_string())).is_err()
        );
    }
}
