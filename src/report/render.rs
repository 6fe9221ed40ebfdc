use crate::regression::RegressionResult;
use crate::report::assembler::{ReportMode, ResearchReport};
use crate::segmentation::QuantileBucket;
use std::fmt::Write;

fn push_buckets(out: &mut String, title: &str, buckets: &[QuantileBucket]) {
    if buckets.is_empty() {
        return;
    }
    let _ = writeln!(out, "\n{}", title);
    for b in buckets {
        let _ = writeln!(
            out,
            "  {:<16} n={:<4} range=[{:.3}, {:.3}] growth={:>8.2}% success={:>5.1}%",
            b.label,
            b.count,
            b.metric_min,
            b.metric_max,
            b.mean_funding_growth,
            b.success_rate * 100.0
        );
    }
}

fn push_variant(out: &mut String, name: &str, result: &RegressionResult) {
    let _ = writeln!(out, "  {:<18} {}", name, result.summary_line());
}

impl ResearchReport {
    /// Format as human-readable report
    pub fn to_report_string(&self) -> String {
        let mut out = String::new();
        let s = &self.summary;

        let title = match self.mode {
            ReportMode::Live => "Technical Debt x Velocity Funding Analysis",
            ReportMode::Demo => "Technical Debt x Velocity Funding Analysis (demo data)",
        };
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "=".repeat(title.len()));
        if let Some(fingerprint) = &self.fingerprint {
            let _ = writeln!(out, "Sample: {}", fingerprint);
        }

        let _ = writeln!(
            out,
            "\nCompanies: {}  Periods: {}  Valid: {}  Excluded: {}",
            s.total_companies, s.total_periods, s.valid_observations, s.excluded_observations
        );
        let _ = writeln!(
            out,
            "TDR change: mean {:.3} (sd {:.3})  Velocity: mean {:.3}",
            s.mean_tdr_change, s.stddev_tdr_change, s.mean_velocity
        );
        let _ = writeln!(
            out,
            "Funding growth: mean {:.2}%  median {:.2}%  Next-round rate: {:.1}%",
            s.mean_funding_growth,
            s.median_funding_growth,
            s.success_rate * 100.0
        );
        if !s.industries.is_empty() {
            let industries: Vec<String> = s
                .industries
                .iter()
                .map(|i| format!("{} {}", i.industry, i.count))
                .collect();
            let _ = writeln!(out, "Industries: {}", industries.join(", "));
        }

        let _ = writeln!(out, "\nInteraction model");
        let r = &self.regression;
        push_variant(&mut out, "primary", r);
        if r.is_fitted() {
            for (name, (coef, se)) in r
                .column_names
                .iter()
                .zip(r.coefficients.iter().zip(&r.standard_errors))
            {
                let _ = writeln!(out, "    {:<28} {:>12.4} ({:.4})", name, coef, se);
            }
            let _ = writeln!(
                out,
                "    adjusted R2 {:.3}, df {}, supported: {}",
                r.adjusted_r_squared,
                r.df,
                if r.hypothesis_supported { "yes" } else { "no" }
            );
        }

        if let Some(checks) = &self.robustness {
            let _ = writeln!(out, "\nRobustness");
            push_variant(&mut out, "log", &checks.log_transformed);
            push_variant(&mut out, "winsorized", &checks.winsorized);
            push_variant(&mut out, "outliers excluded", &checks.outliers_excluded);
            if let Some(placebo) = &checks.placebo {
                push_variant(&mut out, "placebo", placebo);
            }
            let _ = writeln!(
                out,
                "  sign stable: {}",
                if checks.interaction_sign_stable { "yes" } else { "no" }
            );
        }

        let m = &self.strategic_matrix;
        let _ = writeln!(
            out,
            "\nStrategic matrix (median |TDR| {:.3}, median velocity {:.3})",
            m.tdr_median, m.velocity_median
        );
        for b in &m.buckets {
            let _ = writeln!(
                out,
                "  {:<24} n={:<4} share={:>5.1}% growth={:>8.2}% success={:>5.1}%",
                b.bucket.label(),
                b.count,
                b.share * 100.0,
                b.mean_funding_growth,
                b.success_rate * 100.0
            );
        }

        push_buckets(&mut out, "Velocity quartiles", &self.velocity_quartiles);
        push_buckets(&mut out, "TDR change quartiles", &self.tdr_quartiles);
        push_buckets(&mut out, "Quality quintiles", &self.quality_quintiles);

        if !self.top_correlations.is_empty() {
            let _ = writeln!(out, "\nTop correlations");
            for c in &self.top_correlations {
                let _ = writeln!(
                    out,
                    "  {:<20} {:<20} r={:>6.3} {}",
                    c.metric_a, c.metric_b, c.r, c.strength
                );
            }
        }

        if !self.key_findings.is_empty() {
            let _ = writeln!(out, "\nKey findings");
            for finding in &self.key_findings {
                let _ = writeln!(out, "  - {}", finding);
            }
        }

        out
    }
}
