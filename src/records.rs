//! Upstream records consumed by the engine
//!
//! Companies, funding rounds and velocity periods are produced by the
//! repository-analysis and funding-ingestion collaborators. The engine only
//! reads them.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Exit state of a company at the time of analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExitState {
    #[default]
    Active,
    Acquired,
    Ipo,
    Shutdown,
}

/// A startup with a public repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub repository_url: String,
    #[serde(default)]
    pub exit_state: ExitState,
    #[serde(default)]
    pub exit_date: Option<NaiveDate>,
}

/// A single funding event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundingRound {
    pub id: i64,
    pub company_id: i64,
    pub round_type: String,
    pub round_date: NaiveDate,
    #[serde(default)]
    pub amount_usd: Option<f64>,
}

/// Code-quality snapshot taken at the end of a velocity period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualitySnapshot {
    /// Remediation effort / development effort
    pub technical_debt_ratio: f64,
    /// Cyclomatic complexity per 1k lines
    pub complexity_density: f64,
    /// Duplicated lines, percent
    pub duplication_percent: f64,
    /// Static-analysis issues per 1k lines
    pub issue_density: f64,
}

/// Interval between two funding events (or a funding event and an exit)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityPeriod {
    pub id: i64,
    pub company_id: i64,
    #[serde(default)]
    pub from_round_id: Option<i64>,
    #[serde(default)]
    pub to_round_id: Option<i64>,
    pub period_days: u32,
    pub tdr_change: f64,
    pub composite_velocity: f64,
    pub development_speed: f64,
    pub commit_velocity: f64,
    pub code_churn: f64,
    pub author_activity: f64,
    pub got_next_round: bool,
    #[serde(default)]
    pub quality: Option<QualitySnapshot>,
}

/// Everything the upstream collaborators hand to the engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub companies: Vec<Company>,
    #[serde(default)]
    pub funding_rounds: Vec<FundingRound>,
    #[serde(default)]
    pub velocity_periods: Vec<VelocityPeriod>,
}

impl Dataset {
    /// Load a dataset exported as JSON
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is not a valid dataset.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read dataset file: {}", path.as_ref().display())
        })?;
        Self::from_json_str(&content)
    }

    /// Parse a dataset from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let dataset: Dataset =
            serde_json::from_str(content).context("Failed to parse dataset JSON")?;
        tracing::debug!(
            companies = dataset.companies.len(),
            rounds = dataset.funding_rounds.len(),
            periods = dataset.velocity_periods.len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }
}
