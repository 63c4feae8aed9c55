// crates/excuse-config/src/config.rs
// ============================================================================
// Module: Excuse Report Configuration
// Description: Configuration loading and validation for excuse reports.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: excuse-core, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown keys and out-of-range values are rejected rather than ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use excuse_core::DocumentFormat;
use excuse_core::ReportOptions;
use excuse_core::report::DEFAULT_MAX_EXCUSES;
use excuse_core::report::DEFAULT_TITLE;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "excuses.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "EXCUSE_REPORT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum report title length in characters.
pub(crate) const MAX_TITLE_LENGTH: usize = 256;
/// Upper bound for the configurable excuse limit.
pub(crate) const MAX_EXCUSES_CEILING: usize = 1_000_000;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Excuse report configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcuseConfig {
    /// HTML page settings.
    #[serde(default)]
    pub html: HtmlConfig,
    /// Structured document settings.
    #[serde(default)]
    pub document: DocumentConfig,
    /// Report size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl ExcuseConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path);
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.html.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Converts the configuration into report assembly options.
    #[must_use]
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            title: self.html.title.clone(),
            wrap_page: self.html.wrap_page,
            format: self.document.format,
            max_excuses: self.limits.max_excuses,
        }
    }
}

/// HTML page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HtmlConfig {
    /// Page title.
    #[serde(default = "default_title")]
    pub title: String,
    /// Whether to wrap the excuse list in a full page.
    #[serde(default = "default_wrap_page")]
    pub wrap_page: bool,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            wrap_page: default_wrap_page(),
        }
    }
}

impl HtmlConfig {
    /// Validates HTML settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Invalid("html.title must be non-empty".to_string()));
        }
        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ConfigError::Invalid(format!(
                "html.title exceeds {MAX_TITLE_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

/// Structured document configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Serialization format.
    #[serde(default)]
    pub format: DocumentFormat,
}

/// Report size limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Maximum number of excuses per report.
    #[serde(default = "default_max_excuses")]
    pub max_excuses: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_excuses: default_max_excuses(),
        }
    }
}

impl LimitsConfig {
    /// Validates limit settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_excuses == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_excuses must be greater than zero".to_string(),
            ));
        }
        if self.max_excuses > MAX_EXCUSES_CEILING {
            return Err(ConfigError::Invalid(format!(
                "limits.max_excuses exceeds {MAX_EXCUSES_CEILING}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    env::var_os(CONFIG_ENV_VAR).map_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME), PathBuf::from)
}

/// Rejects paths that exceed total or per-component length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default page title.
fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// Default page wrapping.
const fn default_wrap_page() -> bool {
    true
}

/// Default excuse limit.
const fn default_max_excuses() -> usize {
    DEFAULT_MAX_EXCUSES
}
