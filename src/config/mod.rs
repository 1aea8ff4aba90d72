//! Configuration loading and management

use crate::core::error::ConfigError;
use crate::core::pipeline::DEFAULT_PAGE_SIZE;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for the catalog pipeline and its HTTP exposure
///
/// Every field has a default, so a YAML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listings per page
    pub page_size: usize,

    /// Upper bound for a client-requested `limit`
    pub max_page_size: usize,

    /// Quiet period after the last keystroke before a free-text parse
    pub debounce_ms: u64,

    /// Budget for one free-text parse call
    pub parse_timeout_ms: u64,

    /// Address the HTTP server binds to
    pub listen_addr: String,

    /// Serverless AI proxy endpoint used by the HTTP free-text parser
    pub ai_proxy_url: Option<String>,

    /// Marketplace API base URL for the HTTP listing repository
    pub listings_url: Option<String>,

    /// Persisted JSON snapshot for the file listing repository
    pub listings_file: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_page_size: 100,
            debounce_ms: 1_000,
            parse_timeout_ms: 10_000,
            listen_addr: "127.0.0.1:3000".to_string(),
            ai_proxy_url: None,
            listings_url: None,
            listings_file: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path, e),
        })?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(invalid("page_size", self.page_size, "must be at least 1"));
        }
        if self.max_page_size < self.page_size {
            return Err(invalid(
                "max_page_size",
                self.max_page_size,
                "must not be smaller than page_size",
            ));
        }
        if self.parse_timeout_ms == 0 {
            return Err(invalid("parse_timeout_ms", self.parse_timeout_ms, "must be positive"));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn parse_timeout(&self) -> Duration {
        Duration::from_millis(self.parse_timeout_ms)
    }
}

fn invalid(field: &str, value: impl ToString, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
