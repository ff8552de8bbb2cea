//! Experiment suites: repeated debates under varied settings, evaluated and
//! compared pairwise

pub mod excerpts;
pub mod runner;
pub mod suite;

pub use excerpts::{generate_excerpts, Excerpt, ExcerptKind};
pub use runner::{
    ComparisonReport, ExperimentResult, ExperimentRunner, FailedExperiment, PairComparison,
    SuiteResults,
};
pub use suite::{standard_suite, suite_for, ExperimentSpec, COMPARISON_PAIRS};
