// Observation builders shared by unit tests

use crate::records::{Company, Dataset, ExitState, FundingRound, QualitySnapshot, VelocityPeriod};
use crate::regression::Controls;
use crate::sample::Observation;
use chrono::{Days, NaiveDate};

pub(crate) fn observation(tdr_change: f64, composite_velocity: f64, growth: f64, success: bool) -> Observation {
    Observation {
        period_id: 0,
        company_id: 0,
        from_round_id: None,
        to_round_id: None,
        period_days: 365,
        tdr_change,
        composite_velocity,
        development_speed: composite_velocity * 40.0,
        commit_velocity: composite_velocity * 0.5,
        code_churn: 0.2,
        author_activity: 3.0,
        funding_growth_rate: growth,
        got_next_round: success,
        company_age_months: 24.0,
        team_size: 3.0,
        industry: "infrastructure".to_string(),
        round_number: 2,
        quality_score: None,
    }
}

/// Deterministic pseudo-noise in [-1, 1]
pub(crate) fn noise(i: usize) -> f64 {
    (((i as f64 + 1.0) * 12.9898).sin() * 43758.5453).fract().abs() * 2.0 - 1.0
}

/// `n` observations whose growth is driven by the TDR x velocity interaction
///
/// growth = 10 + 5*tdr + 2*velocity + 40*tdr*velocity + small noise
pub(crate) fn interaction_sample(n: usize) -> Vec<Observation> {
    (0..n)
        .map(|i| {
            let tdr = -0.8 + 1.6 * ((i * 7) % n) as f64 / n as f64;
            let velocity = 0.5 + 3.0 * ((i * 11) % n) as f64 / n as f64;
            let growth = 10.0 + 5.0 * tdr + 2.0 * velocity + 40.0 * tdr * velocity + noise(i);
            let mut obs = observation(tdr, velocity, growth, tdr * velocity > 0.0);
            obs.period_id = i as i64;
            obs.company_id = (i / 2) as i64;
            obs.company_age_months = 12.0 + (i % 9) as f64 * 4.0;
            obs.team_size = 2.0 + (i % 5) as f64;
            obs.round_number = 1 + (i % 4) as u32;
            obs.industry = if i % 3 == 0 { "database" } else { "ai/ml" }.to_string();
            obs
        })
        .collect()
}

pub(crate) fn split(observations: &[Observation]) -> (Vec<f64>, Vec<f64>, Vec<f64>, Controls) {
    (
        observations.iter().map(|o| o.tdr_change).collect(),
        observations.iter().map(|o| o.composite_velocity).collect(),
        observations.iter().map(|o| o.funding_growth_rate).collect(),
        Controls::from_observations(observations),
    )
}

/// Upstream records whose assembled sample reproduces an interaction effect
///
/// One company per period. Growth is encoded in the round amounts:
/// growth = 30 + 5*tdr + 2*velocity + 25*tdr*velocity + noise, which stays
/// inside the valid growth bounds for every row.
pub(crate) fn interaction_dataset(n: usize) -> Dataset {
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
        let to_date = from_date + Days::new(365);
        let from_amount = 1_000_000.0;

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
            amount_usd: Some(from_amount),
        });
        dataset.funding_rounds.push(FundingRound {
            id: 2 * id + 1,
            company_id: id,
            round_type: "series_a".to_string(),
            round_date: to_date,
            amount_usd: Some(from_amount * (1.0 + growth / 100.0)),
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
