// Integration test utilities
//
// Builders for upstream record sets and temp files holding them.

#![allow(dead_code)]

use anyhow::Result;
use chrono::{Days, NaiveDate};
use debtlens::records::{Company, Dataset, ExitState, FundingRound, QualitySnapshot, VelocityPeriod};
use std::io::Write;
use tempfile::NamedTempFile;

/// Deterministic pseudo-noise in [-1, 1]
pub fn noise(i: usize) -> f64 {
    (((i as f64 + 1.0) * 12.9898).sin() * 43758.5453).fract().abs() * 2.0 - 1.0
}

/// One company per period; round amounts encode
/// growth = 30 + 5*tdr + 2*velocity + 25*tdr*velocity + noise
pub fn interaction_dataset(n: usize) -> Dataset {
    let base = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
    let urls = [
        "https://github.com/acme/acme-db",
        "https://github.com/acme/acme-llm",
        "https://github.com/acme/kernel",
    ];

    let mut dataset = Dataset::default();
    for i in 0..n {
        let id = i as i64;
        let tdr = -0.8 + 1.6 * ((i * 7) % n) as f64 / n as f64;
        let velocity = 0.5 + 3.0 * ((i * 11) % n) as f64 / n as f64;
        let growth = 30.0 + 5.0 * tdr + 2.0 * velocity + 25.0 * tdr * velocity + noise(i);
        let from_date = base + Days::new((i % 5) as u64 * 30);

        dataset.companies.push(Company {
            id,
            name: format!("company-{}", i),
            repository_url: urls[i % urls.len()].to_string(),
            exit_state: ExitState::Active,
            exit_date: None,
        });
        if i % 2 == 0 {
            dataset.funding_rounds.push(FundingRound {
                id: 10_000 + id,
                company_id: id,
                round_type: "pre_seed".to_string(),
                round_date: from_date - Days::new(60 + (i % 7) as u64 * 45),
                amount_usd: Some(250_000.0),
            });
        }
        dataset.funding_rounds.push(FundingRound {
            id: 2 * id,
            company_id: id,
            round_type: "seed".to_string(),
            round_date: from_date,
            amount_usd: Some(1_000_000.0),
        });
        dataset.funding_rounds.push(FundingRound {
            id: 2 * id + 1,
            company_id: id,
            round_type: "series_a".to_string(),
            round_date: from_date + Days::new(365),
            amount_usd: Some(1_000_000.0 * (1.0 + growth / 100.0)),
        });
        dataset.velocity_periods.push(VelocityPeriod {
            id,
            company_id: id,
            from_round_id: Some(2 * id),
            to_round_id: Some(2 * id + 1),
            period_days: 365,
            tdr_change: tdr,
            composite_velocity: velocity,
            development_speed: velocity * 40.0 + (i % 4) as f64,
            commit_velocity: velocity * 0.5 + 0.1 * noise(i + 100),
            code_churn: 0.2 + 0.05 * (i % 3) as f64,
            author_activity: 2.0 + (i % 5) as f64,
            got_next_round: tdr * velocity > 0.0,
            quality: Some(QualitySnapshot {
                technical_debt_ratio: 0.2 + tdr.abs(),
                complexity_density: 20.0 + (i % 10) as f64 * 5.0,
                duplication_percent: 5.0 + (i % 6) as f64,
                issue_density: 40.0 + (i % 8) as f64 * 10.0,
            }),
        });
    }
    dataset
}

/// Serialize a dataset to a temporary JSON file
pub fn write_dataset(dataset: &Dataset) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, dataset)?;
    file.flush()?;
    Ok(file)
}

/// Write arbitrary text to a temporary file
pub fn write_text(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}
