//! Rubric extraction from free-text judge verdicts
//!
//! Judges are asked for `Dimension: N/5` lines but models drift: markdown
//! tables, bold labels, "4 out of 5", several dimensions on one line. The
//! parser splits every line into segments that start at a dimension keyword
//! and takes the first score found inside each segment.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest score on the rubric scale
pub const MAX_RATING: u8 = 5;

/// Rubric scoring dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Evidence,
    Feasibility,
    Risks,
    Clarity,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Evidence,
        Dimension::Feasibility,
        Dimension::Risks,
        Dimension::Clarity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Evidence => "evidence",
            Dimension::Feasibility => "feasibility",
            Dimension::Risks => "risks",
            Dimension::Clarity => "clarity",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Dimension::Evidence => "Quality and sufficiency of evidence provided",
            Dimension::Feasibility => "Practicality and implementability of proposals",
            Dimension::Risks => "Identification and assessment of potential risks",
            Dimension::Clarity => "Clarity and coherence of arguments",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_lowercase().as_str() {
            "evidence" => Some(Dimension::Evidence),
            "feasibility" => Some(Dimension::Feasibility),
            "risk" | "risks" => Some(Dimension::Risks),
            "clarity" => Some(Dimension::Clarity),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores on the four rubric dimensions, each 0-5
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratings {
    pub evidence: u8,
    pub feasibility: u8,
    pub risks: u8,
    pub clarity: u8,
}

impl Ratings {
    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Evidence => self.evidence,
            Dimension::Feasibility => self.feasibility,
            Dimension::Risks => self.risks,
            Dimension::Clarity => self.clarity,
        }
    }

    /// Set a score, clamped to the rubric scale
    pub fn set(&mut self, dimension: Dimension, value: u8) {
        let value = value.min(MAX_RATING);
        match dimension {
            Dimension::Evidence => self.evidence = value,
            Dimension::Feasibility => self.feasibility = value,
            Dimension::Risks => self.risks = value,
            Dimension::Clarity => self.clarity = value,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, u8)> + '_ {
        Dimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }
}

static KEYWORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(evidence|feasibility|risks?|clarity)\b").expect("keyword pattern")
});

static SCALE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:/|out\s+of)\s*5(?:\.0+)?\b").expect("scale pattern")
});

static BARE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s*_]*[:=][\s*_]*(\d+(?:\.\d+)?)").expect("bare score pattern")
});

/// Round half away from zero; `None` when outside the rubric scale
fn to_rating(raw: &str) -> Option<u8> {
    let value: f64 = raw.parse().ok()?;
    let rounded = value.round();
    (0.0..=f64::from(MAX_RATING))
        .contains(&rounded)
        .then_some(rounded as u8)
}

/// Extracts rubric ratings from judge text
#[derive(Debug, Clone, Copy, Default)]
pub struct RubricParser;

impl RubricParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse every line; later scored mentions overwrite earlier ones
    pub fn parse(&self, text: &str) -> Ratings {
        let mut ratings = Ratings::default();
        for line in text.lines() {
            for (dimension, score) in self.parse_line(line) {
                ratings.set(dimension, score);
            }
        }
        ratings
    }

    /// Scored dimensions mentioned on one line, in order of appearance
    pub fn parse_line(&self, line: &str) -> Vec<(Dimension, u8)> {
        let keywords: Vec<_> = KEYWORD_PATTERN.captures_iter(line).collect();
        let mut scores = Vec::new();

        for (i, caps) in keywords.iter().enumerate() {
            let (Some(whole), Some(word)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(dimension) = Dimension::from_keyword(word.as_str()) else {
                continue;
            };
            let end = keywords
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map(|m| m.start())
                .unwrap_or(line.len());
            let segment = &line[whole.end()..end];

            if let Some(score) = Self::segment_score(segment) {
                scores.push((dimension, score));
            }
        }

        scores
    }

    fn segment_score(segment: &str) -> Option<u8> {
        let scaled = SCALE_PATTERN
            .captures_iter(segment)
            .filter_map(|caps| caps.get(1))
            .find_map(|m| to_rating(m.as_str()));
        if scaled.is_some() {
            return scaled;
        }

        let caps = BARE_PATTERN.captures(segment)?;
        let number = caps.get(1)?;
        let rest = segment[number.end()..].trim_start().to_lowercase();
        if rest.starts_with('/') || rest.starts_with("out of") {
            return None;
        }
        to_rating(number.as_str())
    }
}

// "agreement" must not match inside "disagreement"
static CONVERGENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(consensus|agreements?)\b").expect("convergence pattern")
});

/// Convergence heuristic: the verdict mentions consensus or agreement
pub fn detect_convergence(verdict: &str) -> bool {
    CONVERGENCE_PATTERN.is_match(verdict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn parse(text: &str) -> Ratings {
        RubricParser::new().parse(text)
    }

    #[test]
    fn test_canonical_format() {
        let ratings = parse(
            "Final verdict: adopt with caveats.\n\
             Evidence: 4/5\n\
             Feasibility: 3/5\n\
             Risks: 2/5\n\
             Clarity: 5/5",
        );
        assert_eq!(
            ratings,
            Ratings {
                evidence: 4,
                feasibility: 3,
                risks: 2,
                clarity: 5
            }
        );
    }

    #[test]
    fn test_out_of_five_and_markdown() {
        let ratings = parse(
            "- **Evidence**: 3 out of 5\n\
             | Feasibility | 4 / 5 |\n\
             **Risk assessment** - 1/5",
        );
        assert_eq!(ratings.evidence, 3);
        assert_eq!(ratings.feasibility, 4);
        assert_eq!(ratings.risks, 1);
        assert_eq!(ratings.clarity, 0);
    }

    #[test]
    fn test_several_dimensions_on_one_line() {
        let ratings = parse("Evidence 4/5, Feasibility 2/5, Risks 3/5, Clarity 4/5");
        assert_eq!(
            ratings,
            Ratings {
                evidence: 4,
                feasibility: 2,
                risks: 3,
                clarity: 4
            }
        );
    }

    #[test]
    fn test_bare_colon_score() {
        let ratings = parse("Evidence: 4\nClarity: 3 (could be tighter)");
        assert_eq!(ratings.evidence, 4);
        assert_eq!(ratings.clarity, 3);
    }

    #[test]
    fn test_bare_score_on_another_scale_is_ignored() {
        let ratings = parse("Evidence: 8/10\nClarity: 7 out of 10");
        assert_eq!(ratings.evidence, 0);
        assert_eq!(ratings.clarity, 0);
    }

    #[test]
    fn test_decimal_scores_round_half_away_from_zero() {
        let ratings = parse("Evidence: 3.5/5\nRisks: 2.4/5");
        assert_eq!(ratings.evidence, 4);
        assert_eq!(ratings.risks, 2);
    }

    #[test]
    fn test_scores_above_scale_are_ignored() {
        let ratings = parse("Evidence: 7/5");
        assert_eq!(ratings.evidence, 0);
    }

    #[test]
    fn test_unscored_mentions_do_not_reset() {
        let ratings = parse("Evidence: 4/5\nThe evidence was mostly anecdotal.");
        assert_eq!(ratings.evidence, 4);
    }

    #[test]
    fn test_later_scores_overwrite_earlier() {
        let ratings = parse("Evidence: 2/5\nRevised evidence score: 3/5");
        assert_eq!(ratings.evidence, 3);
    }

    #[test]
    fn test_no_ratings_yields_zeros() {
        assert_eq!(parse("No structured scores here."), Ratings::default());
        assert_eq!(parse(""), Ratings::default());
    }

    #[test]
    fn test_ratings_iteration_order() {
        let ratings = Ratings {
            evidence: 1,
            feasibility: 2,
            risks: 3,
            clarity: 4,
        };
        let collected: Vec<_> = ratings.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Dimension::Evidence, 1),
                (Dimension::Feasibility, 2),
                (Dimension::Risks, 3),
                (Dimension::Clarity, 4)
            ]
        );
    }

    #[test]
    fn test_set_clamps() {
        let mut ratings = Ratings::default();
        ratings.set(Dimension::Clarity, 9);
        assert_eq!(ratings.clarity, MAX_RATING);
    }

    #[test]
    fn test_convergence_detection() {
        assert!(detect_convergence("The panel reached CONSENSUS on the core issue."));
        assert!(detect_convergence("There is broad agreement that..."));
        assert!(detect_convergence("The agents reached several agreements on rollout."));
        assert!(!detect_convergence("Key disagreements remain unresolved."));
        assert!(!detect_convergence("Deep disagreement persists."));
        assert!(!detect_convergence(""));
    }

    proptest! {
        #[test]
        fn parsed_ratings_stay_on_scale(text in ".*") {
            let ratings = RubricParser::new().parse(&text);
            for (_, score) in ratings.iter() {
                prop_assert!(score <= MAX_RATING);
            }
        }

        #[test]
        fn canonical_lines_round_trip(e in 0u8..=5, f in 0u8..=5, r in 0u8..=5, c in 0u8..=5) {
            let text = format!("Evidence: {e}/5\nFeasibility: {f}/5\nRisks: {r}/5\nClarity: {c}/5");
            let ratings = RubricParser::new().parse(&text);
            prop_assert_eq!(ratings, Ratings { evidence: e, feasibility: f, risks: r, clarity: c });
        }
    }
}
