use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level pathorder configuration.
///
/// ```toml
/// [model]
/// max_order = 3
/// significance_level = 0.01
///
/// [[paths]]
/// nodes = ["a", "c", "d"]
/// count = 2.0
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathorderConfig {
    /// Model and selection settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Observed paths.
    #[serde(default)]
    pub paths: Vec<PathToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathToml {
    pub nodes: Vec<String>,
    #[serde(default = "default_count")]
    pub count: f64,
}

fn default_count() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    #[serde(default = "default_max_order")]
    pub max_order: usize,
    #[serde(default = "default_significance_level")]
    pub significance_level: f64,
    #[serde(default = "default_assumption")]
    pub assumption: String,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            max_order: default_max_order(),
            significance_level: default_significance_level(),
            assumption: default_assumption(),
            parallel: false,
            parallel_threshold: default_parallel_threshold(),
            seed: None,
        }
    }
}

fn default_max_order() -> usize {
    3
}
fn default_significance_level() -> f64 {
    0.01
}
fn default_assumption() -> String {
    "paths".to_string()
}
fn default_parallel_threshold() -> usize {
    1024
}

/// Reads and parses a configuration file.
pub fn load(path: &Path) -> Result<PathorderConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}
