//! CLI argument parsing for debtlens

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the research report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// Pretty-printed JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "debtlens")]
#[command(version)]
#[command(
    about = "Test whether development velocity moderates the effect of technical-debt change on startup funding",
    long_about = None
)]
pub struct Cli {
    /// JSON dataset with companies, funding_rounds and velocity_periods
    /// (omit to print the demo report)
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// TOML run configuration
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["debtlens"]);
        assert!(cli.input.is_none());
        assert!(cli.config.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_input_and_config() {
        let cli = Cli::parse_from([
            "debtlens",
            "--input",
            "data.json",
            "-c",
            "debtlens.toml",
        ]);
        assert_eq!(cli.input, Some(PathBuf::from("data.json")));
        assert_eq!(cli.config, Some(PathBuf::from("debtlens.toml")));
    }

    #[test]
    fn test_cli_json_format() {
        let cli = Cli::parse_from(["debtlens", "--format", "json", "--debug"]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["debtlens", "--format", "csv"]).is_err());
    }
}
