//! debtlens - does development velocity moderate the effect of technical-debt
//! change on startup funding?
//!
//! This library provides the statistical inference engine: it joins upstream
//! company, funding-round and velocity-period records into an observation
//! sample, fits an interaction regression from scratch, re-runs it under
//! robustness variants, segments the sample descriptively and assembles
//! everything into a single report.
//!
//! # Example
//! ```
//! use debtlens::config::AnalysisConfig;
//! use debtlens::records::Dataset;
//! use debtlens::report::assemble_report;
//!
//! // An empty dataset yields the fixed demo report
//! let report = assemble_report(&Dataset::default(), &AnalysisConfig::default())?;
//! assert!(report.is_demo());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod correlation;
pub mod error;
pub mod linalg;
pub mod records;
pub mod regression;
pub mod report;
pub mod robustness;
pub mod sample;
pub mod segmentation;

#[cfg(test)]
mod fixtures;

pub use error::{AnalysisError, Result};
pub use report::{assemble_report, ResearchReport};
