// Descriptive segmentation of the valid sample
//
// Three independent passes, none of which feed the regression:
// - Strategic matrix: 2x2 median split on |TDR change| x composite velocity
// - Quartiles: index-proportional buckets over a sorted metric
// - Quintiles: fixed-size slices over the composite quality score
//
// Every pass is a pure fold into per-bucket accumulators; boundaries and
// medians are recomputed from the sample each run.

mod accumulator;
mod buckets;
mod quality;
mod strategic;

pub use buckets::{quartile_analysis, quartile_index, quintile_analysis, QuantileBucket, QUINTILE_LABELS};
pub use quality::{
    composite_quality_score, COMPLEXITY_DENSITY_CAP, DUPLICATION_CAP, ISSUE_DENSITY_CAP, TDR_CAP,
};
pub use strategic::{
    classify, median, strategic_matrix, BucketSummary, StrategicBucket, StrategicMatrix,
};
