//! # Onco Common Library
//!
//! Shared code for the onco services including:
//! - Error type used across crates
//! - Configuration loading (TOML file + compiled defaults)
//! - Database initialization
//! - Timestamp and identifier helpers

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
