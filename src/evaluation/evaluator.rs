//! Rubric-based scoring of finished debates

use super::rubric::Dimension;
use super::stats::{rate, SeriesStats};
use crate::debate::DebateRecord;
use crate::error::{DebateError, DebateResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

const STRONG_CONVERGENCE: [&str; 3] = ["strong consensus", "unanimous", "complete agreement"];
const WEAK_CONVERGENCE: [&str; 3] = ["partial agreement", "some consensus", "mostly agreed"];
const MODERATE_CONVERGENCE: [&str; 3] = ["consensus", "agreement", "converged"];

/// One scored rubric criterion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub dimension: Dimension,
    pub name: String,
    pub description: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub rating: u8,
    pub weight: f64,
    pub weighted_score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceAssessment {
    pub achieved: bool,
    pub score: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDiversity {
    pub unique_roles: usize,
    pub roles: Vec<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageQuality {
    pub average_length: f64,
    pub length_rating: u8,
    pub role_diversity: RoleDiversity,
    pub overall_quality: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyAssessment {
    pub seconds: f64,
    pub rating: String,
}

/// Evaluation report for one debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub overall_score: f64,
    pub overall_rating: String,
    pub detailed_scores: BTreeMap<Dimension, CriterionScore>,
    pub convergence: ConvergenceAssessment,
    pub message_quality: MessageQuality,
    pub latency: LatencyAssessment,
    pub summary: String,
}

/// Aggregate view over several evaluations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationComparison {
    pub overall_scores: Vec<f64>,
    pub average_score: f64,
    pub convergence_rate: f64,
    pub criteria_comparison: BTreeMap<Dimension, SeriesStats>,
}

/// Scores debate records against the four-dimension rubric
#[derive(Debug, Clone)]
pub struct DebateEvaluator {
    criteria: Vec<Criterion>,
}

impl Default for DebateEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateEvaluator {
    pub fn new() -> Self {
        let criteria = Dimension::ALL
            .into_iter()
            .map(|dimension| Criterion {
                dimension,
                name: title_case(dimension.as_str()),
                description: dimension.description().to_string(),
                weight: 1.0,
            })
            .collect();
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn evaluate(&self, record: &DebateRecord) -> Evaluation {
        let mut detailed_scores = BTreeMap::new();
        let mut total_score = 0.0;
        let mut total_weight = 0.0;

        for criterion in &self.criteria {
            let rating = record.ratings.get(criterion.dimension);
            let weighted_score = f64::from(rating) * criterion.weight;
            detailed_scores.insert(
                criterion.dimension,
                CriterionScore {
                    rating,
                    weight: criterion.weight,
                    weighted_score,
                    description: rating_description(f64::from(rating)).to_string(),
                },
            );
            total_score += weighted_score;
            total_weight += criterion.weight;
        }

        let overall_score = if total_weight > 0.0 {
            total_score / total_weight
        } else {
            0.0
        };

        let convergence_score = convergence_score(record.convergence, record.verdict_text());
        let convergence = ConvergenceAssessment {
            achieved: record.convergence,
            score: convergence_score,
            description: convergence_description(convergence_score).to_string(),
        };

        let latency = LatencyAssessment {
            seconds: record.latency_secs,
            rating: latency_rating(record.latency_secs).to_string(),
        };

        let mut evaluation = Evaluation {
            overall_score,
            overall_rating: rating_description(overall_score).to_string(),
            detailed_scores,
            convergence,
            message_quality: message_quality(record),
            latency,
            summary: String::new(),
        };
        evaluation.summary = summarize(&evaluation);
        evaluation
    }

    pub fn compare(&self, evaluations: &[Evaluation]) -> DebateResult<EvaluationComparison> {
        let overall = SeriesStats::from_values(evaluations.iter().map(|e| e.overall_score))
            .ok_or_else(|| DebateError::invalid_input("no evaluations to compare"))?;

        let mut criteria_comparison = BTreeMap::new();
        for criterion in &self.criteria {
            let scores = evaluations.iter().map(|e| {
                e.detailed_scores
                    .get(&criterion.dimension)
                    .map(|s| f64::from(s.rating))
                    .unwrap_or(0.0)
            });
            if let Some(stats) = SeriesStats::from_values(scores) {
                criteria_comparison.insert(criterion.dimension, stats);
            }
        }

        Ok(EvaluationComparison {
            average_score: overall.average,
            overall_scores: overall.values,
            convergence_rate: rate(evaluations.iter().map(|e| e.convergence.achieved)),
            criteria_comparison,
        })
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn rating_description(rating: f64) -> &'static str {
    if rating <= 0.5 {
        "Poor - Significant weaknesses"
    } else if rating <= 1.5 {
        "Fair - Some strengths but notable weaknesses"
    } else if rating <= 2.5 {
        "Average - Balanced strengths and weaknesses"
    } else if rating <= 3.5 {
        "Good - Clear strengths with minor weaknesses"
    } else if rating <= 4.5 {
        "Very Good - Strong performance with minimal weaknesses"
    } else {
        "Excellent - Outstanding performance"
    }
}

/// Weak indicators are checked before moderate ones since each contains one
pub fn convergence_score(achieved: bool, verdict: &str) -> f64 {
    if !achieved {
        return 1.0;
    }
    let verdict = verdict.to_lowercase();
    let mentions = |indicators: &[&str]| indicators.iter().any(|i| verdict.contains(i));

    if mentions(&STRONG_CONVERGENCE) {
        5.0
    } else if mentions(&WEAK_CONVERGENCE) {
        3.0
    } else if mentions(&MODERATE_CONVERGENCE) {
        4.0
    } else {
        3.5
    }
}

fn convergence_description(score: f64) -> &'static str {
    if score <= 2.0 {
        "No convergence - Agents remained in disagreement"
    } else if score <= 3.0 {
        "Limited convergence - Some progress but significant disagreements remain"
    } else if score <= 4.0 {
        "Moderate convergence - General agreement with some reservations"
    } else {
        "Strong convergence - Clear consensus or agreement reached"
    }
}

fn message_quality(record: &DebateRecord) -> MessageQuality {
    if record.messages.is_empty() {
        return MessageQuality {
            average_length: 0.0,
            length_rating: 0,
            role_diversity: RoleDiversity {
                unique_roles: 0,
                roles: Vec::new(),
                score: 0.0,
            },
            overall_quality: 0.0,
            description: "No messages to evaluate".to_string(),
        };
    }

    let total_chars: usize = record
        .messages
        .iter()
        .map(|m| m.content.chars().count())
        .sum();
    let average_length = total_chars as f64 / record.messages.len() as f64;

    let length_rating = if average_length < 100.0 {
        1
    } else if average_length < 300.0 {
        3
    } else if average_length < 800.0 {
        5
    } else {
        4
    };

    let roles: BTreeSet<&str> = record.messages.iter().map(|m| m.role.as_str()).collect();
    let diversity = (roles.len() as f64 / 4.0).min(1.0) * 5.0;
    let overall_quality = (f64::from(length_rating) + diversity) / 2.0;

    MessageQuality {
        average_length,
        length_rating,
        role_diversity: RoleDiversity {
            unique_roles: roles.len(),
            roles: roles.into_iter().map(str::to_string).collect(),
            score: diversity,
        },
        overall_quality,
        description: message_quality_description(overall_quality).to_string(),
    }
}

fn message_quality_description(score: f64) -> &'static str {
    if score <= 2.0 {
        "Poor quality - Messages are too brief or lack diversity"
    } else if score <= 3.0 {
        "Fair quality - Messages have some substance but could be improved"
    } else if score <= 4.0 {
        "Good quality - Messages are detailed and diverse"
    } else {
        "Excellent quality - Messages are comprehensive and well-balanced"
    }
}

pub fn latency_rating(seconds: f64) -> &'static str {
    if seconds < 30.0 {
        "Excellent - Very fast response"
    } else if seconds < 60.0 {
        "Good - Reasonable response time"
    } else if seconds < 120.0 {
        "Fair - Somewhat slow but acceptable"
    } else {
        "Poor - Slow response time"
    }
}

fn summarize(evaluation: &Evaluation) -> String {
    let mut summary = format!(
        "Debate Quality Assessment: {} ({:.1}/5.0)\nConvergence: {}\n",
        evaluation.overall_rating,
        evaluation.overall_score,
        if evaluation.convergence.achieved {
            "Achieved"
        } else {
            "Not Achieved"
        }
    );

    // First maximum and first minimum in rubric order
    let scores = &evaluation.detailed_scores;
    let strongest = scores
        .iter()
        .reduce(|best, next| if next.1.rating > best.1.rating { next } else { best });
    let weakest = scores
        .iter()
        .reduce(|worst, next| if next.1.rating < worst.1.rating { next } else { worst });
    if let (Some((strong, s)), Some((weak, w))) = (strongest, weakest) {
        summary.push_str(&format!("Strongest Area: {strong} ({}/5)\n", s.rating));
        summary.push_str(&format!("Weakest Area: {weak} ({}/5)\n", w.rating));
    }

    summary.push_str(&format!(
        "Response Time: {:.1} seconds ({})\n",
        evaluation.latency.seconds, evaluation.latency.rating
    ));
    summary
}
