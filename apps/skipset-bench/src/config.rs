//! Run settings, loadable from JSON or YAML.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use skipset::LevelConfig;

use crate::log::{LogFormat, LogLevel};

/// One timed section of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    Insert,
    Erase,
    Find,
    Iterate,
}

impl Workload {
    pub const ALL: [Workload; 4] = [
        Workload::Insert,
        Workload::Erase,
        Workload::Find,
        Workload::Iterate,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Workload::Insert => "INSERT",
            Workload::Erase => "ERASE",
            Workload::Find => "FIND",
            Workload::Iterate => "ITERATE",
        }
    }
}

/// Configuration format types supported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Detect from the file extension; anything unknown is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Element counts, each timed separately
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,

    /// Repetitions per size, each with fresh input
    #[serde(default = "default_rounds")]
    pub rounds: usize,

    /// Seed for input generation; random when absent
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_workloads")]
    pub workloads: Vec<Workload>,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Promotion settings for the skip sets under test
    #[serde(default)]
    pub levels: LevelConfig,
}

fn default_sizes() -> Vec<usize> {
    vec![1_000, 10_000, 100_000]
}

fn default_rounds() -> usize {
    1
}

fn default_workloads() -> Vec<Workload> {
    Workload::ALL.to_vec()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            rounds: default_rounds(),
            seed: None,
            workloads: default_workloads(),
            format: LogFormat::default(),
            log_level: LogLevel::default(),
            levels: LevelConfig::default(),
        }
    }
}

impl BenchConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.sizes.is_empty(), "at least one size is required");
        ensure!(
            self.sizes.iter().all(|&size| size > 0),
            "sizes must be positive, got {:?}",
            self.sizes
        );
        ensure!(self.rounds > 0, "rounds must be at least 1");
        ensure!(!self.workloads.is_empty(), "at least one workload is required");
        self.levels.validate().context("invalid level settings")?;
        Ok(())
    }
}

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<BenchConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;

    match ConfigFormat::from_path(path) {
        ConfigFormat::Json => serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse JSON config {}", path.display())),
        ConfigFormat::Yaml => serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse YAML config {}", path.display())),
    }
}
