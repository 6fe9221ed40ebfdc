// Sample assembly: join upstream records into per-period observations
//
// Each velocity period is joined with its "from"/"to" funding rounds and its
// company, then enriched with controls (age, team size, industry, round
// number) and screened against the inferential bounds. Rows failing any
// bound stay available to descriptive passes only.

mod assembler;
mod industry;
mod source;

pub use assembler::{
    assemble_sample, company_age_months, funding_growth_rate, round_number, team_size,
    Observation, Sample, DAYS_PER_MONTH, MAX_ABS_TDR_CHANGE, MAX_FUNDING_GROWTH,
    MIN_FUNDING_GROWTH,
};
pub use industry::{IndustryClassifier, IndustryRule, DEFAULT_INDUSTRY};
pub use source::{enrich_periods, EnrichedPeriod, InMemorySource, RecordSource};

/// Minimum valid rows for the regression engine
pub const MIN_REGRESSION_SAMPLE: usize = 20;

/// Minimum valid rows for correlation passes and a live report
pub const MIN_CORRELATION_SAMPLE: usize = 10;
