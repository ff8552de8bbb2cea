//! Notable transcript excerpts for reports

use super::runner::ExperimentResult;
use crate::agent::AgentRole;
use serde::{Deserialize, Serialize};

const ERROR_KEYWORDS: [&str; 5] = ["error", "flaw", "incorrect", "mistake", "weakness"];
const CONTEXT_CHARS: usize = 200;
const QUOTE_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExcerptKind {
    /// A critic pointing out a problem in the message before it
    CriticCatchingError {
        context: String,
        critic_response: String,
    },
    Synthesis {
        synthesis: String,
    },
    Verdict {
        verdict: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    pub experiment: String,
    pub round: u32,
    #[serde(flatten)]
    pub kind: ExcerptKind,
}

fn clip(text: &str, max_chars: usize) -> String {
    let mut clipped: String = text.chars().take(max_chars).collect();
    clipped.push_str("...");
    clipped
}

/// First `limit` excerpts across all results, in transcript order
pub fn generate_excerpts(results: &[ExperimentResult], limit: usize) -> Vec<Excerpt> {
    let mut excerpts = Vec::new();

    for result in results {
        let messages = &result.debate_result.messages;
        for (i, message) in messages.iter().enumerate() {
            let excerpt = |kind: ExcerptKind| Excerpt {
                experiment: result.experiment_name.clone(),
                round: message.round,
                kind,
            };

            match message.role {
                AgentRole::Critic if i > 0 => {
                    let lowered = message.content.to_lowercase();
                    if ERROR_KEYWORDS.iter().any(|k| lowered.contains(k)) {
                        excerpts.push(excerpt(ExcerptKind::CriticCatchingError {
                            context: clip(&messages[i - 1].content, CONTEXT_CHARS),
                            critic_response: clip(&message.content, QUOTE_CHARS),
                        }));
                    }
                }
                AgentRole::Synthesizer if i > 1 => {
                    excerpts.push(excerpt(ExcerptKind::Synthesis {
                        synthesis: clip(&message.content, QUOTE_CHARS),
                    }));
                }
                AgentRole::Judge => {
                    excerpts.push(excerpt(ExcerptKind::Verdict {
                        verdict: clip(&message.content, QUOTE_CHARS),
                    }));
                }
                _ => {}
            }
        }
    }

    excerpts.truncate(limit);
    excerpts
}
