//! Command-line and environment configuration tests
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests that
//! set ONCO_* variables are marked #[serial].

use std::env;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use onco_common::config::CompiledDefaults;
use onco_predict::config::{Args, ServiceConfig};
use serial_test::serial;

const ENV_VARS: [&str; 6] = [
    "ONCO_CONFIG",
    "ONCO_HOST",
    "ONCO_PORT",
    "ONCO_MODEL_PATH",
    "ONCO_DATABASE",
    "ONCO_CANCER_THRESHOLD",
];

fn clear_env() {
    for var in ENV_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_cli_flags_parse() {
    clear_env();

    let args = Args::try_parse_from([
        "onco-predict",
        "--port",
        "9100",
        "--model-path",
        "/models/cancer.onnx",
        "--cancer-threshold",
        "2.5",
    ])
    .unwrap();

    assert_eq!(args.port, Some(9100));
    assert_eq!(args.model_path, Some(PathBuf::from("/models/cancer.onnx")));
    assert_eq!(args.cancer_threshold, Some(2.5));
    assert_eq!(args.host, None);
}

#[test]
#[serial]
fn test_env_vars_fill_flags() {
    clear_env();
    env::set_var("ONCO_PORT", "9200");
    env::set_var("ONCO_MODEL_PATH", "/env/model.onnx");

    let args = Args::try_parse_from(["onco-predict"]).unwrap();

    assert_eq!(args.port, Some(9200));
    assert_eq!(args.model_path, Some(PathBuf::from("/env/model.onnx")));
    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    env::set_var("ONCO_PORT", "9200");

    let args = Args::try_parse_from(["onco-predict", "--port", "9300"]).unwrap();

    assert_eq!(args.port, Some(9300));
    clear_env();
}

#[test]
#[serial]
fn test_toml_file_from_flag_feeds_resolution() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "model_path = \"/toml/model.onnx\"\nport = 8123\ncancer_threshold = 3.0"
    )
    .unwrap();

    let args = Args::try_parse_from([
        "onco-predict",
        "--config",
        file.path().to_str().unwrap(),
        "--port",
        "8200",
    ])
    .unwrap();
    let toml = args.load_toml().unwrap();
    let config =
        ServiceConfig::resolve(&args, toml, CompiledDefaults::for_current_platform()).unwrap();

    assert_eq!(config.port, 8200);
    assert_eq!(config.model_path, PathBuf::from("/toml/model.onnx"));
    assert_eq!(config.cancer_threshold, 3.0);
}

#[test]
#[serial]
fn test_missing_config_file_is_not_fatal() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let args = Args::try_parse_from([
        "onco-predict",
        "--config",
        missing.to_str().unwrap(),
        "--model-path",
        "/m.onnx",
    ])
    .unwrap();
    let toml = args.load_toml().unwrap();
    let config =
        ServiceConfig::resolve(&args, toml, CompiledDefaults::for_current_platform()).unwrap();

    assert_eq!(config.port, onco_common::config::DEFAULT_PORT);
    assert_eq!(config.cancer_threshold, 1.0);
}
