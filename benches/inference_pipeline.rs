/// Inference pipeline benchmarks
///
/// Measures the OLS solve at realistic sample sizes and the full report
/// assembly (sample join, regression, robustness, segmentation).
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use debtlens::config::AnalysisConfig;
use debtlens::records::{Company, Dataset, ExitState, FundingRound, VelocityPeriod};
use debtlens::regression::{regress, Controls};
use debtlens::report::assemble_report;
use chrono::{Days, NaiveDate};
use std::time::Duration;

fn noise(i: usize) -> f64 {
    (((i as f64 + 1.0) * 12.9898).sin() * 43758.5453).fract().abs() * 2.0 - 1.0
}

fn columns(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>, Controls) {
    let tdr: Vec<f64> = (0..n).map(|i| -0.8 + 1.6 * ((i * 7) % n) as f64 / n as f64).collect();
    let velocity: Vec<f64> = (0..n).map(|i| 0.5 + 3.0 * ((i * 11) % n) as f64 / n as f64).collect();
    let growth: Vec<f64> = (0..n)
        .map(|i| 10.0 + 40.0 * tdr[i] * velocity[i] + noise(i))
        .collect();
    let controls = Controls {
        company_age_months: (0..n).map(|i| 12.0 + (i % 9) as f64 * 4.0).collect(),
        team_size: (0..n).map(|i| 2.0 + (i % 5) as f64).collect(),
        round_number: (0..n).map(|i| 1.0 + (i % 4) as f64).collect(),
        industry: (0..n)
            .map(|i| ["database", "ai/ml", "infrastructure"][i % 3].to_string())
            .collect(),
    };
    (tdr, velocity, growth, controls)
}

fn dataset(n: usize) -> Dataset {
    let base = NaiveDate::from_ymd_opt(2019, 3, 1).unwrap();
    let mut dataset = Dataset::default();
    for i in 0..n {
        let id = i as i64;
        let tdr = -0.8 + 1.6 * ((i * 7) % n) as f64 / n as f64;
        let velocity = 0.5 + 3.0 * ((i * 11) % n) as f64 / n as f64;
        let growth = 30.0 + 25.0 * tdr * velocity + noise(i);
        let from_date = base + Days::new((i % 5) as u64 * 30);

        dataset.companies.push(Company {
            id,
            name: format!("company-{}", i),
            repository_url: format!("https://github.com/bench/repo-{}-db", i),
            exit_state: ExitState::Active,
            exit_date: None,
        });
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
            development_speed: velocity * 40.0,
            commit_velocity: velocity * 0.5,
            code_churn: 0.2,
            author_activity: 2.0 + (i % 5) as f64,
            got_next_round: tdr * velocity > 0.0,
            quality: None,
        });
    }
    dataset
}

fn bench_regression(c: &mut Criterion) {
    let mut group = c.benchmark_group("regression");
    group.measurement_time(Duration::from_secs(5));

    for n in [25, 100, 400] {
        let (tdr, velocity, growth, controls) = columns(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("regress", n), &n, |b, _| {
            b.iter(|| {
                black_box(regress(
                    black_box(&tdr),
                    black_box(&velocity),
                    black_box(&growth),
                    black_box(&controls),
                ))
            });
        });
    }

    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("report");
    group.measurement_time(Duration::from_secs(5));

    for n in [50, 200] {
        let data = dataset(n);
        for (name, config) in [
            ("parallel", AnalysisConfig::default()),
            ("sequential", AnalysisConfig::sequential()),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &data, |b, data| {
                b.iter(|| black_box(assemble_report(black_box(data), &config)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_regression, bench_report);
criterion_main!(benches);
