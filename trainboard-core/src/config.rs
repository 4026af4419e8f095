//! Client configuration loaded from TOML.
//!
//! Provides two loading methods:
//! - `default_config()` - the embedded `config/trainboard.toml`
//! - `parse_config(text)` - a caller-supplied TOML document

use anyhow::{ensure, Result};
use serde::Deserialize;

use crate::model::{ModelKey, Scoring, SearchStrategy};

/// Embedded defaults, compiled into the binary.
const DEFAULT_CONFIG: &str = include_str!("../config/trainboard.toml");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub dataset: DatasetConfig,
    pub training: TrainingDefaults,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiConfig {
    /// Path prefix of the service endpoints, e.g. "/api"
    pub base_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetConfig {
    /// Column chosen as target whenever a dataset contains it
    pub canonical_target: String,
    /// Row window fetched on startup and after uploads
    pub default_limit: usize,
    /// Row windows offered in the preview
    pub limits: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingDefaults {
    pub test_size: f64,
    pub random_seed: u64,
    pub cv_folds: u32,
    pub cv_min: u32,
    pub cv_max: u32,
    pub scoring: Scoring,
    pub use_class_weight: bool,
    pub search: SearchStrategy,
    pub max_iterations: u32,
    pub selected_models: Vec<ModelKey>,
}

impl AppConfig {
    fn validate(&self) -> Result<()> {
        ensure!(
            !self.dataset.limits.is_empty(),
            "dataset.limits must offer at least one preview size"
        );
        ensure!(
            self.dataset.limits.contains(&self.dataset.default_limit),
            "dataset.default_limit {} is not one of dataset.limits",
            self.dataset.default_limit
        );
        let t = &self.training;
        ensure!(t.cv_min >= 2, "training.cv_min must be at least 2");
        ensure!(
            (t.cv_min..=t.cv_max).contains(&t.cv_folds),
            "training.cv_folds {} outside [{}, {}]",
            t.cv_folds,
            t.cv_min,
            t.cv_max
        );
        ensure!(
            t.test_size > 0.0 && t.test_size < 1.0,
            "training.test_size must be in (0, 1)"
        );
        Ok(())
    }
}

/// Parse and validate a TOML configuration document.
pub fn parse_config(text: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Get the configuration embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_config() -> AppConfig {
    parse_config(DEFAULT_CONFIG).expect("embedded trainboard.toml must be valid")
}
