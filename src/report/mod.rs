// Report assembly
//
// Sample -> { regression + robustness, segmentation + correlations } -> report
//
// The two middle branches read the same immutable valid sample and run on
// crossbeam scoped threads when `parallel` is set. An empty velocity
// dataset, or fewer than MIN_CORRELATION_SAMPLE valid rows, yields the fixed
// demo report instead of a live computation.

mod assembler;
mod demo;
mod findings;
mod fingerprint;
mod render;
mod summary;

pub use assembler::{
    assemble_report, assemble_report_with, report_from_sample, ReportMode, ResearchReport,
};
pub use demo::{demo_report, DemoFixture, DEMO_FIXTURE};
pub use findings::key_findings;
pub use fingerprint::sample_fingerprint;
pub use summary::{summarize, IndustryCount, SummaryStatistics};
