//! Client configuration file support.
//!
//! This module provides the settings shared by every network-facing part of
//! the crate (HTTP timeout, polling interval, helper service endpoints) and
//! reads them from TOML configuration files. Nothing is taken from the
//! environment; [`ClientConfig::default`] is what zero-config constructors use.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{TapError, TapResult};

/// Default CDS Sesame endpoint (XML output, all resolvers).
pub const DEFAULT_SESAME_URL: &str = "http://cdsweb.u-strasbg.fr/cgi-bin/nph-sesame/-ox";

/// Default SQL pretty-printing endpoint.
pub const DEFAULT_SQLFORMAT_URL: &str = "https://sqlformat.org/api/v1/format";

/// Client configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub http: HttpSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub services: ServiceSettings,
}

/// HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Async job polling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingSettings {
    /// Delay between two status requests while waiting for a job
    #[serde(default = "default_interval_secs")]
    pub interval_secs: f64,
}

/// Helper service endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_sesame_url")]
    pub sesame_url: String,
    #[serde(default = "default_sqlformat_url")]
    pub sqlformat_url: String,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("tap-client/{}", env!("CARGO_PKG_VERSION"))
}

fn default_interval_secs() -> f64 {
    0.2
}

fn default_sesame_url() -> String {
    DEFAULT_SESAME_URL.to_string()
}

fn default_sqlformat_url() -> String {
    DEFAULT_SQLFORMAT_URL.to_string()
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            sesame_url: default_sesame_url(),
            sqlformat_url: default_sqlformat_url(),
        }
    }
}

impl ClientConfig {
    /// Load client configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ClientConfig)` if successful
    /// * `Err(TapError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> TapResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TapError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse client configuration from TOML text and validate it.
    pub fn from_toml_str(content: &str) -> TapResult<Self> {
        let config: ClientConfig = toml::from_str(content).map_err(|e| {
            TapError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> TapResult<()> {
        if self.http.timeout_secs == 0 {
            return Err(TapError::Configuration(
                "'http.timeout_secs' must be greater than zero".to_string(),
            ));
        }

        if !self.polling.interval_secs.is_finite() || self.polling.interval_secs < 0.0 {
            return Err(TapError::Configuration(format!(
                "'polling.interval_secs' must be a non-negative number, got {}",
                self.polling.interval_secs
            )));
        }

        if self.services.sesame_url.is_empty() {
            return Err(TapError::Configuration(
                "'services.sesame_url' must not be empty".to_string(),
            ));
        }

        if self.services.sqlformat_url.is_empty() {
            return Err(TapError::Configuration(
                "'services.sqlformat_url' must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// HTTP request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_secs)
    }

    /// Default delay between two job status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(self.polling.interval_secs)
    }
}
