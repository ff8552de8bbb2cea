//! Judge verdict parsing and debate scoring

pub mod evaluator;
pub mod rubric;
pub mod stats;

pub use evaluator::{DebateEvaluator, Evaluation, EvaluationComparison};
pub use rubric::{detect_convergence, Dimension, Ratings, RubricParser, MAX_RATING};
pub use stats::SeriesStats;
