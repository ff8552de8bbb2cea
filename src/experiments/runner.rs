//! Sequential experiment suites with per-run evaluation and JSON output

use super::suite::{suite_for, ExperimentSpec, COMPARISON_PAIRS};
use crate::debate::{sanitize_topic, DebateConfiguration, DebateRecord, DebateSystem};
use crate::error::{DebateError, DebateResult};
use crate::evaluation::{DebateEvaluator, Evaluation, EvaluationComparison};
use crate::observability::experiment_span;
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, Instrument};

/// A successful experiment with its evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub experiment_name: String,
    pub description: String,
    pub configuration: DebateConfiguration,
    pub debate_result: DebateRecord,
    pub evaluation: Evaluation,
    pub timestamp: DateTime<Utc>,
}

/// An experiment that errored; the suite carries on without it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedExperiment {
    pub experiment_name: String,
    pub description: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// Head-to-head numbers for one baseline/variant pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    pub baseline: String,
    pub variant: String,
    pub baseline_score: f64,
    pub variant_score: f64,
    /// Variant minus baseline
    pub difference: f64,
    pub baseline_convergence: bool,
    pub variant_convergence: bool,
    pub baseline_latency_secs: f64,
    pub variant_latency_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    #[serde(flatten)]
    pub evaluations: EvaluationComparison,
    pub experiment_comparisons: BTreeMap<String, PairComparison>,
}

/// Everything a suite produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteResults {
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    pub experiments: Vec<ExperimentResult>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed: Vec<FailedExperiment>,
    /// Absent when no experiment succeeded
    pub comparison: Option<ComparisonReport>,
}

/// Runs experiment suites through a `DebateSystem`
pub struct ExperimentRunner {
    system: DebateSystem,
    evaluator: DebateEvaluator,
    results_dir: PathBuf,
}

fn file_stamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> DebateResult<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

impl ExperimentRunner {
    /// Results go to the configured `output.results_dir`
    pub fn new(system: DebateSystem) -> Self {
        let results_dir = system.config().output.results_dir.clone();
        Self::with_results_dir(system, results_dir)
    }

    pub fn with_results_dir(system: DebateSystem, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            system,
            evaluator: DebateEvaluator::new(),
            results_dir: results_dir.into(),
        }
    }

    pub fn system(&self) -> &DebateSystem {
        &self.system
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Run the configured suite, or the standard one when none is configured
    pub async fn run_standard_experiments(
        &mut self,
        topic: &str,
        short: bool,
    ) -> DebateResult<SuiteResults> {
        let specs = suite_for(self.system.config(), short);
        self.run_suite(topic, &specs).await
    }

    pub async fn run_suite(
        &mut self,
        topic: &str,
        specs: &[ExperimentSpec],
    ) -> DebateResult<SuiteResults> {
        let topic = sanitize_topic(topic);
        if topic.is_empty() {
            return Err(DebateError::invalid_input(
                "topic is empty after sanitisation",
            ));
        }
        for spec in specs {
            spec.validate()?;
        }
        std::fs::create_dir_all(&self.results_dir)?;

        let mut experiments = Vec::with_capacity(specs.len());
        let mut failed = Vec::new();

        for (i, spec) in specs.iter().enumerate() {
            info!(
                "Running experiment {}/{}: {} ({})",
                i + 1,
                specs.len(),
                spec.name,
                spec.description
            );

            let span = experiment_span!(name = %spec.name);
            match self
                .system
                .run_debate(&topic, spec.to_options())
                .instrument(span)
                .await
            {
                Ok(record) => {
                    let result = self.evaluate(spec, record);
                    info!(
                        experiment = %spec.name,
                        overall_score = result.evaluation.overall_score,
                        convergence = result.evaluation.convergence.achieved,
                        latency_secs = result.evaluation.latency.seconds,
                        "Completed experiment"
                    );
                    self.save_experiment_result(&result)?;
                    experiments.push(result);
                }
                Err(e) => {
                    let message = e.sanitized();
                    error!(experiment = %spec.name, error = %message, "Experiment failed");
                    failed.push(FailedExperiment {
                        experiment_name: spec.name.clone(),
                        description: spec.description.clone(),
                        error: message,
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        let comparison = if experiments.is_empty() {
            None
        } else {
            Some(self.create_comparison_report(&experiments)?)
        };

        let results = SuiteResults {
            topic,
            timestamp: Utc::now(),
            experiments,
            failed,
            comparison,
        };
        self.save_complete_results(&results)?;
        Ok(results)
    }

    fn evaluate(&self, spec: &ExperimentSpec, record: DebateRecord) -> ExperimentResult {
        ExperimentResult {
            experiment_name: spec.name.clone(),
            description: spec.description.clone(),
            configuration: record.configuration.clone(),
            evaluation: self.evaluator.evaluate(&record),
            debate_result: record,
            timestamp: Utc::now(),
        }
    }

    pub fn create_comparison_report(
        &self,
        results: &[ExperimentResult],
    ) -> DebateResult<ComparisonReport> {
        let evaluations: Vec<Evaluation> = results.iter().map(|r| r.evaluation.clone()).collect();
        let find = |name: &str| results.iter().find(|r| r.experiment_name == name);

        let experiment_comparisons = COMPARISON_PAIRS
            .iter()
            .filter_map(|&(key, baseline, variant)| {
                let (b, v) = (find(baseline)?, find(variant)?);
                Some((
                    key.to_string(),
                    PairComparison {
                        baseline: baseline.to_string(),
                        variant: variant.to_string(),
                        baseline_score: b.evaluation.overall_score,
                        variant_score: v.evaluation.overall_score,
                        difference: v.evaluation.overall_score - b.evaluation.overall_score,
                        baseline_convergence: b.evaluation.convergence.achieved,
                        variant_convergence: v.evaluation.convergence.achieved,
                        baseline_latency_secs: b.evaluation.latency.seconds,
                        variant_latency_secs: v.evaluation.latency.seconds,
                    },
                ))
            })
            .collect();

        Ok(ComparisonReport {
            evaluations: self.evaluator.compare(&evaluations)?,
            experiment_comparisons,
        })
    }

    /// `<name>_<YYYYmmdd_HHMMSS>.json` under the results directory
    pub fn save_experiment_result(&self, result: &ExperimentResult) -> DebateResult<PathBuf> {
        let path = self
            .results_dir
            .join(format!("{}_{}.json", result.experiment_name, file_stamp()));
        write_json(&path, result)?;
        Ok(path)
    }

    /// `complete_results_<YYYYmmdd_HHMMSS>.json` under the results directory
    pub fn save_complete_results(&self, results: &SuiteResults) -> DebateResult<PathBuf> {
        let path = self
            .results_dir
            .join(format!("complete_results_{}.json", file_stamp()));
        write_json(&path, results)?;
        info!(path = %path.display(), "Saved suite results");
        Ok(path)
    }
}
