// Run configuration for the analysis pipeline
//
// Only execution knobs live here. Statistical contract values (minimum
// sample sizes, the 0.05 / 0.10 decision rule, percentile indices, caps)
// are constants in their modules and cannot be overridden.

use crate::error::AnalysisError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Placebo (shuffled dependent variable) robustness variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceboConfig {
    pub enabled: bool,
    /// Seed for the shuffle; the same seed reproduces the same placebo fit
    pub seed: u64,
}

impl Default for PlaceboConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            seed: 42,
        }
    }
}

impl PlaceboConfig {
    /// Seed to use, or `None` when the variant is disabled
    pub fn seed(&self) -> Option<u64> {
        self.enabled.then_some(self.seed)
    }
}

/// Configuration for one analysis run
///
/// Every field has a default, so an empty TOML file is a valid config.
///
/// # Example
/// ```
/// use debtlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert!(config.parallel);
/// assert_eq!(config.fetch_workers, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Run the regression branch and the segmentation branch concurrently
    pub parallel: bool,

    /// Number of scoped threads used to enrich velocity periods
    ///
    /// Default: 4
    pub fetch_workers: usize,

    pub placebo: PlaceboConfig,

    /// TOML file replacing the embedded industry keyword sets
    pub industry_rules: Option<PathBuf>,

    /// Attach a SHA-256 digest of the valid sample to the report
    pub fingerprint: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            fetch_workers: 4,
            placebo: PlaceboConfig::default(),
            industry_rules: None,
            fingerprint: true,
        }
    }
}

impl AnalysisConfig {
    /// Single-threaded run with no placebo variant
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            fetch_workers: 1,
            placebo: PlaceboConfig {
                enabled: false,
                ..PlaceboConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load and validate a TOML config file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate().map_err(AnalysisError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fetch_workers == 0 {
            return Err("fetch_workers must be >= 1, got 0".to_string());
        }

        if let Some(path) = &self.industry_rules {
            if path.as_os_str().is_empty() {
                return Err("industry_rules must not be an empty path".to_string());
            }
        }

        Ok(())
    }
}
