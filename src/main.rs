use anyhow::{Context, Result};
use clap::Parser;
use debtlens::cli::{Cli, OutputFormat};
use debtlens::config::AnalysisConfig;
use debtlens::records::Dataset;
use debtlens::report::assemble_report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises the level to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_toml(path)?,
        None => AnalysisConfig::default(),
    };

    // No input means the demo report
    let dataset = match &args.input {
        Some(path) => Dataset::from_json_file(path)?,
        None => Dataset::default(),
    };

    let report = assemble_report(&dataset, &config)?;

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }

    Ok(())
}
