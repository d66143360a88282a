//! TOML-based engine configuration.
//!
//! Stores the server connection settings the HTTP backend needs:
//! base URL, bearer token, request timeout, and the client timezone
//! offset sent with every GET.

use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ConfigError, EngineError, Result};

/// Device timezone offset in the JS `getTimezoneOffset` convention
/// the server expects: UTC minus local, in minutes.
pub fn local_timezone_offset_minutes() -> i32 {
    -(Local::now().offset().local_minus_utc() / 60)
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_language() -> String {
    "en".to_string()
}

/// Engine configuration, normally loaded from `marathon.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Server root, e.g. `https://api.example.com`. The `/api` prefix
    /// is appended by the client.
    pub base_url: String,
    /// Bearer token for authenticated calls.
    #[serde(default)]
    pub auth_token: Option<String>,
    /// Minutes offset from UTC reported to the server, mirroring the
    /// mobile client's `timeZoneOffset` query parameter.
    #[serde(default)]
    pub timezone_offset_minutes: i32,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_language")]
    pub user_language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            auth_token: None,
            timezone_offset_minutes: local_timezone_offset_minutes(),
            request_timeout_secs: default_timeout_secs(),
            user_language: default_user_language(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config: EngineConfig =
            toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Check that the config is usable before handing it to the
    /// HTTP backend.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidValue {
            key: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// The `<base_url>/api` root all endpoints hang off.
    pub fn api_base_url(&self) -> Result<Url> {
        let root = self.base_url.trim_end_matches('/');
        Url::parse(&format!("{root}/api")).map_err(|e| {
            EngineError::from(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                message: e.to_string(),
            })
        })
    }
}
