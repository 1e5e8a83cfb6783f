//! Service configuration resolution
//!
//! **Priority:** command line / `ONCO_*` environment → TOML file → compiled defaults

use clap::Parser;
use onco_common::config::{
    default_config_path, load_toml_config, validate_threshold, CompiledDefaults, TomlConfig,
};
use onco_common::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::pipeline::policy::DEFAULT_CANCER_THRESHOLD;

/// Command-line arguments for onco-predict
#[derive(Parser, Debug, Default)]
#[command(name = "onco-predict")]
#[command(about = "Image classification and prediction history service")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "ONCO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "ONCO_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "ONCO_PORT")]
    pub port: Option<u16>,

    /// Trained classifier model file (ONNX)
    #[arg(short, long, env = "ONCO_MODEL_PATH")]
    pub model_path: Option<PathBuf>,

    /// SQLite database file for prediction records
    #[arg(short, long, env = "ONCO_DATABASE")]
    pub database: Option<PathBuf>,

    /// Confidence score (0-100) below which an image is classified non-cancer
    #[arg(long, env = "ONCO_CANCER_THRESHOLD")]
    pub cancer_threshold: Option<f64>,
}

impl Args {
    /// Load the TOML file named by `--config`, or the default location
    pub fn load_toml(&self) -> Result<TomlConfig> {
        match self.config.clone().or_else(default_config_path) {
            Some(path) => load_toml_config(&path),
            None => Ok(TomlConfig::default()),
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub model_path: PathBuf,
    pub database_path: PathBuf,
    pub cancer_threshold: f64,
    pub log_level: String,
}

impl ServiceConfig {
    pub fn resolve(args: &Args, toml: TomlConfig, defaults: CompiledDefaults) -> Result<Self> {
        let model_path = args
            .model_path
            .clone()
            .or(toml.model_path)
            .ok_or_else(|| {
                Error::Config(
                    "model path not configured. Set one of:\n\
                     1. Command line: --model-path /path/to/model.onnx\n\
                     2. Environment: ONCO_MODEL_PATH=/path/to/model.onnx\n\
                     3. TOML config: model_path = \"/path/to/model.onnx\""
                        .to_string(),
                )
            })?;

        let cancer_threshold = args
            .cancer_threshold
            .or(toml.cancer_threshold)
            .unwrap_or(DEFAULT_CANCER_THRESHOLD);
        validate_threshold(cancer_threshold)?;

        Ok(Self {
            host: args.host.clone().or(toml.host).unwrap_or(defaults.host),
            port: args.port.or(toml.port).unwrap_or(defaults.port),
            model_path,
            database_path: args
                .database
                .clone()
                .or(toml.database_path)
                .unwrap_or(defaults.database_path),
            cancer_threshold,
            log_level: toml.logging.level.unwrap_or(defaults.log_level),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port).parse().map_err(|e| {
            Error::Config(format!(
                "Invalid listen address {}:{}: {}",
                self.host, self.port, e
            ))
        })
    }
}
