//! Configuration loading
//!
//! Resolution priority (highest first):
//! 1. Command-line argument / environment variable (handled by each binary)
//! 2. TOML config file
//! 3. OS-dependent compiled default (fallback)
//!
//! A missing TOML file is not an error: the service logs a warning and
//! starts with compiled defaults. A file that exists but cannot be parsed is.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default listen address
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Default log level when neither RUST_LOG nor the TOML file sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

/// On-disk configuration file contents
///
/// Every field is optional so partial files are valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub model_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    /// Confidence score (0-100) below which an image is classified non-cancer
    pub cancer_threshold: Option<f64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// OS-dependent defaults used when neither CLI nor TOML provide a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    pub log_level: String,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_path: default_data_folder().join("onco.db"),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Get OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/onco (or /var/lib/onco for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("onco"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/onco"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("onco"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/onco"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("onco"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\onco"))
    } else {
        PathBuf::from("./onco_data")
    }
}

/// Default configuration file path: `<config_dir>/onco/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("onco").join("config.toml"))
}

/// Load the TOML configuration file
///
/// Returns `TomlConfig::default()` (with a warning) when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file not found at {}, using compiled defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    if let Some(threshold) = config.cancer_threshold {
        validate_threshold(threshold)?;
    }

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Thresholds are confidence scores, so they must lie in [0, 100]
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && (0.0..=100.0).contains(&threshold) {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "cancer_threshold must be between 0 and 100, got {}",
            threshold
        )))
    }
}
