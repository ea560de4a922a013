//! Access layer configuration
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment overrides:
//!
//! - `VOLUNTEERVERSE_API_URL` - backend base URL (default: http://localhost:3000)
//! - `VOLUNTEERVERSE_REQUEST_TIMEOUT_MS` - per-request timeout (default: 10000)
//! - `VOLUNTEERVERSE_NOTICE_POLL_SECS` - notice badge poll interval (default: 60)
//! - `VOLUNTEERVERSE_LOG_LEVEL` - fallback log filter when `RUST_LOG` is unset

use crate::error::{AccessError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_API_URL: &str = "VOLUNTEERVERSE_API_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "VOLUNTEERVERSE_REQUEST_TIMEOUT_MS";
pub const ENV_NOTICE_POLL_SECS: &str = "VOLUNTEERVERSE_NOTICE_POLL_SECS";
pub const ENV_LOG_LEVEL: &str = "VOLUNTEERVERSE_LOG_LEVEL";

/// Origins older screens hard-coded; rewritten to the configured base
const LEGACY_ORIGINS: [&str; 2] = ["http://localhost:5000", "https://localhost:5000"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Backend base URL
    pub api_base: String,

    /// Timeout applied to every backend request
    pub request_timeout_ms: u64,

    /// Notice badge poll interval
    pub notice_poll_interval_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:3000".to_string(),
            request_timeout_ms: 10_000,
            notice_poll_interval_secs: 60,
            log_level: "info".to_string(),
        }
    }
}

impl AccessConfig {
    /// Defaults, then `path` if given, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply overrides from `lookup` (normally the process environment)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_base) = lookup(ENV_API_URL) {
            self.api_base = api_base;
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT_MS) {
            self.request_timeout_ms = parse_number(ENV_REQUEST_TIMEOUT_MS, &value)?;
        }
        if let Some(value) = lookup(ENV_NOTICE_POLL_SECS) {
            self.notice_poll_interval_secs = parse_number(ENV_NOTICE_POLL_SECS, &value)?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ApiBase::parse(&self.api_base)?;
        if self.request_timeout_ms == 0 {
            return Err(AccessError::InvalidConfig(
                "request_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.notice_poll_interval_secs == 0 {
            return Err(AccessError::InvalidConfig(
                "notice_poll_interval_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api(&self) -> Result<ApiBase> {
        ApiBase::parse(&self.api_base)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn notice_poll_interval(&self) -> Duration {
        Duration::from_secs(self.notice_poll_interval_secs)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| AccessError::InvalidConfig(format!("{} must be a number, got '{}'", key, value)))
}

/// Normalized backend base URL (scheme + host, no trailing slash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim().trim_end_matches('/');
        let rest = trimmed
            .strip_prefix("http://")
            .or_else(|| trimmed.strip_prefix("https://"))
            .ok_or_else(|| {
                AccessError::InvalidConfig(format!("api_base must be an http(s) URL, got '{}'", value))
            })?;
        if rest.is_empty() {
            return Err(AccessError::InvalidConfig(format!("api_base has no host: '{}'", value)));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL for `path`.
    ///
    /// Relative paths are joined onto the base with exactly one slash;
    /// legacy `localhost:5000` URLs are rebased; other absolute URLs pass
    /// through untouched.
    pub fn url(&self, path: &str) -> String {
        let path = LEGACY_ORIGINS
            .iter()
            .find_map(|origin| path.strip_prefix(origin))
            .unwrap_or(path);

        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        format!("{}/{}", self.0, path.trim_start_matches('/'))
    }
}
