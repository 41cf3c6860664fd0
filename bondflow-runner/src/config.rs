//! Serializable runner configuration.

use bondflow_core::feeds::ErrorPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// All parameters of a pipeline run. Loadable from TOML; every field has
/// a default so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    /// Directory the generated feed files are written to and read from.
    pub data_dir: PathBuf,
    /// Directory the persisted sink files are written to.
    pub result_dir: PathBuf,
    /// Seed for the synthetic data generator.
    pub seed: u64,
    /// Price records per product.
    pub price_points: usize,
    /// Market depth records per product.
    pub depth_points: usize,
    /// Total trade records.
    pub trade_count: usize,
    /// Total inquiry records.
    pub inquiry_count: usize,
    /// Per-record failure isolation for all feeds.
    pub error_policy: ErrorPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            result_dir: PathBuf::from("results"),
            seed: 42,
            price_points: 1_000,
            depth_points: 1_000,
            trade_count: 70,
            inquiry_count: 70,
            error_policy: ErrorPolicy::Abort,
        }
    }
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
