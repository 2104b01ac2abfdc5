//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Largest page size the search API accepts.
pub const MAX_ITEMS_PER_PAGE: u32 = 80;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file, ...).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A resolved value is outside its allowed range.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pixsearch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the photo API (without the `/search` path).
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Page size for search requests.
    #[serde(default)]
    pub items_per_page: Option<u32>,

    /// Quiet period before a typed query is committed, in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// HTTP request timeout in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Drop page responses that arrive after a newer search started.
    #[serde(default)]
    pub discard_stale_responses: Option<bool>,

    /// Where the API key is persisted.
    #[serde(default)]
    pub key_file_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// API base URL.
    pub api_base_url: String,
    /// Page size.
    pub items_per_page: u32,
    /// Search debounce in milliseconds.
    pub debounce_ms: u64,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Drop superseded responses.
    pub discard_stale_responses: bool,
    /// API key file.
    pub key_file_path: PathBuf,
    /// Log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.pexels.com/v1".to_string(),
            items_per_page: 20,
            debounce_ms: 400,
            request_timeout_secs: 30,
            discard_stale_responses: true,
            key_file_path: default_key_file_path(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Debounce quiet period as a `Duration`.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// HTTP request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check ranges that the types alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a page size outside
    /// `1..=MAX_ITEMS_PER_PAGE`, a zero timeout, or an empty API URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 || self.items_per_page > MAX_ITEMS_PER_PAGE {
            return Err(ConfigError::InvalidValue {
                field: "items_per_page",
                reason: format!(
                    "must be between 1 and {}, got {}",
                    MAX_ITEMS_PER_PAGE, self.items_per_page
                ),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pixsearch/pixsearch.log` on Linux, or the
/// appropriate platform path elsewhere. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pixsearch").join("pixsearch.log")
    } else {
        PathBuf::from("pixsearch.log")
    }
}

/// Resolve default credential file path.
///
/// Returns `~/.local/share/pixsearch/api_key` on Linux, or the appropriate
/// platform path elsewhere. Falls back to the current directory.
pub fn default_key_file_path() -> PathBuf {
    if let Some(data_dir) = dirs::data_dir() {
        data_dir.join("pixsearch").join("api_key")
    } else {
        PathBuf::from("pixsearch_api_key")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pixsearch/config.toml` on Linux, appropriate path on
/// other platforms. Returns `None` if no config directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pixsearch").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PIXSEARCH_CONFIG` environment variable
/// 3. Default path `~/.config/pixsearch/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PIXSEARCH_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        items_per_page: config.items_per_page.unwrap_or(defaults.items_per_page),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        request_timeout_secs: config
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs),
        discard_stale_responses: config
            .discard_stale_responses
            .unwrap_or(defaults.discard_stale_responses),
        key_file_path: config.key_file_path.unwrap_or(defaults.key_file_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PIXSEARCH_API_URL`: Override API base URL
/// - `PIXSEARCH_PER_PAGE`: Override page size (ignored with a warning if not a number)
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("PIXSEARCH_API_URL") {
        config.api_base_url = url;
    }

    if let Ok(raw) = std::env::var("PIXSEARCH_PER_PAGE") {
        match raw.trim().parse::<u32>() {
            Ok(per_page) => config.items_per_page = per_page,
            Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid PIXSEARCH_PER_PAGE"),
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence. Only flags explicitly given by the
/// user are passed as `Some`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    per_page_override: Option<u32>,
    debounce_override: Option<u64>,
) -> ResolvedConfig {
    if let Some(per_page) = per_page_override {
        config.items_per_page = per_page;
    }

    if let Some(debounce_ms) = debounce_override {
        config.debounce_ms = debounce_ms;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
