use crate::records::{FundingRound, VelocityPeriod};
use crate::sample::industry::{IndustryClassifier, DEFAULT_INDUSTRY};
use crate::sample::source::{enrich_periods, EnrichedPeriod, RecordSource};
use crate::segmentation::composite_quality_score;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Average month length used for company age
pub const DAYS_PER_MONTH: f64 = 30.44;

/// Observations with `|tdr_change|` at or above this are excluded
pub const MAX_ABS_TDR_CHANGE: f64 = 2.0;

/// Funding growth bounds (percent, inclusive)
pub const MIN_FUNDING_GROWTH: f64 = -50.0;
pub const MAX_FUNDING_GROWTH: f64 = 1000.0;

/// One velocity period for one company, with derived controls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub period_id: i64,
    pub company_id: i64,
    pub from_round_id: Option<i64>,
    pub to_round_id: Option<i64>,
    pub period_days: u32,
    pub tdr_change: f64,
    pub composite_velocity: f64,
    /// Legacy single-factor velocity (lines changed per day)
    pub development_speed: f64,
    pub commit_velocity: f64,
    pub code_churn: f64,
    pub author_activity: f64,
    /// Percent change in round amount; 0 when either amount is unknown
    pub funding_growth_rate: f64,
    pub got_next_round: bool,
    pub company_age_months: f64,
    pub team_size: f64,
    pub industry: String,
    pub round_number: u32,
    pub quality_score: Option<f64>,
}

impl Observation {
    /// All five inferential bounds hold
    pub fn is_valid(&self) -> bool {
        self.composite_velocity > 0.0
            && self.tdr_change.abs() < MAX_ABS_TDR_CHANGE
            && (MIN_FUNDING_GROWTH..=MAX_FUNDING_GROWTH).contains(&self.funding_growth_rate)
            && self.company_age_months > 0.0
            && self.team_size > 0.0
    }

    /// `got_next_round` as 0/1
    pub fn success(&self) -> f64 {
        if self.got_next_round {
            1.0
        } else {
            0.0
        }
    }
}

/// Output of one assembler run
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// Every period, valid or not (descriptive passes)
    pub all: Vec<Observation>,
    /// Periods passing every bound (inferential passes)
    pub valid: Vec<Observation>,
}

impl Sample {
    pub fn excluded(&self) -> usize {
        self.all.len() - self.valid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Percent change from `from` to `to`
pub fn funding_growth_rate(from_amount: Option<f64>, to_amount: Option<f64>) -> f64 {
    match (from_amount, to_amount) {
        (Some(from), Some(to)) if from > 0.0 => (to - from) / from * 100.0,
        _ => 0.0,
    }
}

/// 1-based position of `to_round_id` among the company's rounds by date
///
/// Ties keep input order. A period with no (or an unknown) "to" round sits
/// after the last round.
pub fn round_number(company_rounds: &[FundingRound], to_round_id: Option<i64>) -> u32 {
    let mut sorted: Vec<&FundingRound> = company_rounds.iter().collect();
    sorted.sort_by_key(|r| r.round_date);

    let position = to_round_id.and_then(|id| sorted.iter().position(|r| r.id == id));
    match position {
        Some(idx) => idx as u32 + 1,
        None => sorted.len() as u32 + 1,
    }
}

fn period_end(enriched: &EnrichedPeriod<'_>) -> Option<NaiveDate> {
    enriched
        .to_round
        .as_ref()
        .map(|r| r.round_date)
        .or_else(|| enriched.company.as_ref().and_then(|c| c.exit_date))
        .or_else(|| {
            enriched.from_round.as_ref().and_then(|r| {
                r.round_date
                    .checked_add_days(Days::new(u64::from(enriched.period.period_days)))
            })
        })
}

/// Months from the company's first observable date to the end of the period
///
/// Returns 0 when no date is known, which excludes the row.
pub fn company_age_months(enriched: &EnrichedPeriod<'_>) -> f64 {
    let Some(end) = period_end(enriched) else {
        return 0.0;
    };
    let Some(start) = end.checked_sub_days(Days::new(u64::from(enriched.period.period_days)))
    else {
        return 0.0;
    };

    let anchor = enriched
        .company_rounds
        .iter()
        .map(|r| r.round_date)
        .min()
        .map_or(start, |first| first.min(start));

    (end - anchor).num_days() as f64 / DAYS_PER_MONTH
}

/// Active authors, rounded, at least one
pub fn team_size(author_activity: f64) -> f64 {
    let rounded = author_activity.round();
    if rounded.is_finite() {
        rounded.max(1.0)
    } else {
        1.0
    }
}

fn observation_from(enriched: &EnrichedPeriod<'_>, classifier: &IndustryClassifier) -> Observation {
    let period: &VelocityPeriod = enriched.period;
    let growth = funding_growth_rate(
        enriched.from_round.as_ref().and_then(|r| r.amount_usd),
        enriched.to_round.as_ref().and_then(|r| r.amount_usd),
    );
    let industry = enriched
        .company
        .as_ref()
        .map_or(DEFAULT_INDUSTRY, |c| classifier.classify(&c.repository_url))
        .to_string();

    Observation {
        period_id: period.id,
        company_id: period.company_id,
        from_round_id: period.from_round_id,
        to_round_id: period.to_round_id,
        period_days: period.period_days,
        tdr_change: period.tdr_change,
        composite_velocity: period.composite_velocity,
        development_speed: period.development_speed,
        commit_velocity: period.commit_velocity,
        code_churn: period.code_churn,
        author_activity: period.author_activity,
        funding_growth_rate: growth,
        got_next_round: period.got_next_round,
        company_age_months: company_age_months(enriched),
        team_size: team_size(period.author_activity),
        industry,
        round_number: round_number(&enriched.company_rounds, period.to_round_id),
        quality_score: period.quality.as_ref().map(composite_quality_score),
    }
}

/// Join periods with their upstream records, derive controls and filter
///
/// Invalid rows are kept in [`Sample::all`] for descriptive passes but never
/// reach [`Sample::valid`].
pub fn assemble_sample<S: RecordSource + Sync + ?Sized>(
    periods: &[VelocityPeriod],
    source: &S,
    classifier: &IndustryClassifier,
    workers: usize,
) -> Sample {
    let enriched = enrich_periods(periods, source, workers);
    let all: Vec<Observation> = enriched
        .iter()
        .map(|e| observation_from(e, classifier))
        .collect();
    let valid: Vec<Observation> = all.iter().filter(|o| o.is_valid()).cloned().collect();

    tracing::debug!(
        periods = all.len(),
        valid = valid.len(),
        excluded = all.len() - valid.len(),
        "Assembled sample"
    );

    Sample { all, valid }
}
