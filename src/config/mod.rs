pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use self::validation::validate_config;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_PATH: &str = "callview.yaml";

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How per-entry expand toggles interact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpandMode {
    /// At most one entry expanded; expanding another collapses it.
    #[default]
    Exclusive,
    /// Every entry keeps its own flag.
    Independent,
}

impl fmt::Display for ExpandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpandMode::Exclusive => write!(f, "exclusive"),
            ExpandMode::Independent => write!(f, "independent"),
        }
    }
}

impl FromStr for ExpandMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exclusive" => Ok(ExpandMode::Exclusive),
            "independent" => Ok(ExpandMode::Independent),
            other => Err(format!(
                "unknown expand mode '{other}', expected 'exclusive' or 'independent'"
            )),
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Plain-text entries longer than this many characters are collapsible.
    #[serde(default = "default_collapse_threshold")]
    pub collapse_threshold: usize,
    /// Lines kept visible while a collapsible entry is collapsed.
    #[serde(default = "default_collapsed_lines")]
    pub collapsed_lines: usize,
    #[serde(default)]
    pub expand_mode: ExpandMode,
    /// Indent width for pretty-printed parameters and results.
    #[serde(default = "default_indent")]
    pub indent: usize,
    /// Characters per visual line when clamping collapsed text.
    #[serde(default = "default_wrap_width")]
    pub wrap_width: usize,
}

fn default_collapse_threshold() -> usize {
    150
}
fn default_collapsed_lines() -> usize {
    3
}
fn default_indent() -> usize {
    2
}
fn default_wrap_width() -> usize {
    80
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: default_collapse_threshold(),
            collapsed_lines: default_collapsed_lines(),
            expand_mode: ExpandMode::default(),
            indent: default_indent(),
            wrap_width: default_wrap_width(),
        }
    }
}

/// Feature flags and settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Drop `io.continue` / `io.end` entries before rendering.
    #[serde(default = "default_true")]
    pub hide_control_calls: bool,
}

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "WARNING".to_string()
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            hide_control_calls: true,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
}

/// Load configuration from a YAML file and validate it.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when reading the file fails, [`ConfigError::Yaml`]
/// when parsing fails, or [`ConfigError::Validation`] when semantic validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Load `path` if it exists, otherwise fall back to defaults.
///
/// # Errors
///
/// Same as [`load_config`] for a file that exists.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<AppConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    load_config(path)
}

/// Parse and validate configuration from YAML text.
///
/// # Errors
///
/// Returns [`ConfigError::Yaml`] or [`ConfigError::Validation`].
pub fn parse_config(contents: &str) -> Result<AppConfig, ConfigError> {
    // An empty document deserializes to unit, not to a struct of defaults.
    let config: AppConfig = if contents.trim().is_empty() {
        AppConfig::default()
    } else {
        serde_yaml::from_str(contents)?
    };
    validate_config(&config)?;
    Ok(config)
}
