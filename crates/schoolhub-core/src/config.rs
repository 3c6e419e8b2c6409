//! Application configuration management.
//!
//! Configuration is stored at `~/.config/schoolhub/config.json` and holds the
//! backend base endpoint and the last email used to log in. The base endpoint
//! can be overridden with the `SCHOOLHUB_API_URL` environment variable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::ApiError;

/// Application name used for config/data directory paths
const APP_NAME: &str = "schoolhub";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the backend base endpoint
pub const API_URL_ENV: &str = "SCHOOLHUB_API_URL";

/// Backend used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the persisted session and log files
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    /// Backend base endpoint: an explicit override (e.g. a command-line flag)
    /// first, then the environment, then the config file, then the default.
    pub fn base_url(&self, override_url: Option<&str>) -> Result<String, ApiError> {
        let from_env = std::env::var(API_URL_ENV).ok();
        resolve_base_url(
            override_url.or(from_env.as_deref()),
            self.api_base_url.as_deref(),
        )
    }
}

/// Pick the first non-blank candidate and normalize it into a base endpoint.
pub fn resolve_base_url(from_env: Option<&str>, configured: Option<&str>) -> Result<String, ApiError> {
    let raw = [from_env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_URL);

    normalize_base_url(raw)
}

/// Trim trailing slashes and require an absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = reqwest::Url::parse(trimmed)
        .map_err(|e| ApiError::InvalidConfig(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(ApiError::InvalidConfig(format!(
            "unsupported scheme '{}' in {}",
            other, trimmed
        ))),
    }
}
