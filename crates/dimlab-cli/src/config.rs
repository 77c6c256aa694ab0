//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every value here is a default; the matching command-line flag always
/// wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default file locations
    #[serde(default)]
    pub paths: Paths,

    /// Review session defaults
    #[serde(default)]
    pub review: Review,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Default file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paths {
    /// Hypothesis corpus (newline-delimited JSON)
    #[serde(default = "default_corpus")]
    pub corpus: PathBuf,

    /// Quality-label export
    #[serde(default = "default_quality_labels")]
    pub quality_labels: PathBuf,

    /// Topic dimension-selection export
    #[serde(default = "default_dimension_labels")]
    pub dimension_labels: PathBuf,

    /// Metrics export
    #[serde(default = "default_metrics")]
    pub metrics: PathBuf,
}

/// Review session defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Number of units to sample for a session
    #[serde(default = "default_sample_size")]
    pub sample_size: i64,

    /// Seed for deterministic sampling
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".dimlab").join("config.toml"))
    }

    /// Load configuration from the default location or create defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            corpus: default_corpus(),
            quality_labels: default_quality_labels(),
            dimension_labels: default_dimension_labels(),
            metrics: default_metrics(),
        }
    }
}

impl Default for Review {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            seed: default_seed(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_corpus() -> PathBuf {
    PathBuf::from("hypotheses.jsonl")
}

fn default_quality_labels() -> PathBuf {
    PathBuf::from("labeled_hypotheses.jsonl")
}

fn default_dimension_labels() -> PathBuf {
    PathBuf::from("topics_ideological_dimensions.json")
}

fn default_metrics() -> PathBuf {
    PathBuf::from("topics_ideological_dimensions_metrics.json")
}

fn default_sample_size() -> i64 {
    200
}

fn default_seed() -> u64 {
    42
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
