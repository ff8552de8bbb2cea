//! Side-by-side comparison of debate records

use super::record::{DebateConfiguration, DebateRecord};
use crate::error::{DebateError, DebateResult};
use crate::evaluation::{Dimension, SeriesStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub total_experiments: usize,
    pub topics: Vec<String>,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceComparison {
    pub converged: usize,
    pub diverged: usize,
    pub convergence_rate: f64,
}

/// Aggregated ratings, convergence, latency and transcript sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentComparison {
    pub summary: ComparisonSummary,
    pub configurations: Vec<DebateConfiguration>,
    pub ratings_comparison: BTreeMap<Dimension, SeriesStats>,
    pub convergence_comparison: ConvergenceComparison,
    pub latency_comparison: SeriesStats,
    pub message_count_comparison: SeriesStats,
}

fn empty() -> DebateError {
    DebateError::invalid_input("no results to compare")
}

pub fn compare_experiments(records: &[DebateRecord]) -> DebateResult<ExperimentComparison> {
    let (first, rest) = records.split_first().ok_or_else(empty)?;

    let (started, finished) = rest.iter().fold(
        (first.timestamp, first.timestamp),
        |(lo, hi), r| (lo.min(r.timestamp), hi.max(r.timestamp)),
    );
    let topics: BTreeSet<&str> = records.iter().map(|r| r.topic.as_str()).collect();

    let mut ratings_comparison = BTreeMap::new();
    for dimension in Dimension::ALL {
        let values = records.iter().map(|r| f64::from(r.ratings.get(dimension)));
        ratings_comparison.insert(dimension, SeriesStats::from_values(values).ok_or_else(empty)?);
    }

    let converged = records.iter().filter(|r| r.convergence).count();

    Ok(ExperimentComparison {
        summary: ComparisonSummary {
            total_experiments: records.len(),
            topics: topics.into_iter().map(str::to_string).collect(),
            started,
            finished,
        },
        configurations: records.iter().map(|r| r.configuration.clone()).collect(),
        ratings_comparison,
        convergence_comparison: ConvergenceComparison {
            converged,
            diverged: records.len() - converged,
            convergence_rate: converged as f64 / records.len() as f64,
        },
        latency_comparison: SeriesStats::from_values(records.iter().map(|r| r.latency_secs))
            .ok_or_else(empty)?,
        message_count_comparison: SeriesStats::from_values(
            records.iter().map(|r| r.total_messages as f64),
        )
        .ok_or_else(empty)?,
    })
}
