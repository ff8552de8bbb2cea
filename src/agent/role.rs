//! Debate roles
//!
//! A role fixes an agent's system prompt, its user-prompt template and how
//! much of the transcript it sees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of trailing messages shown to roles with a short memory
pub const RECENT_WINDOW: usize = 3;

/// Role played by an agent in a debate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Researcher,
    Critic,
    Synthesizer,
    #[serde(alias = "devils-advocate", alias = "devil's advocate")]
    DevilsAdvocate,
    Judge,
}

/// Slice of the transcript rendered into an agent's prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextWindow {
    None,
    Last(usize),
    Full,
}

impl ContextWindow {
    /// Apply the window to a transcript
    pub fn select<'a, T>(&self, history: &'a [T]) -> &'a [T] {
        match *self {
            ContextWindow::None => &[],
            ContextWindow::Last(n) => &history[history.len().saturating_sub(n)..],
            ContextWindow::Full => history,
        }
    }
}

impl AgentRole {
    pub const ALL: [AgentRole; 5] = [
        AgentRole::Researcher,
        AgentRole::Critic,
        AgentRole::Synthesizer,
        AgentRole::DevilsAdvocate,
        AgentRole::Judge,
    ];

    /// Stable snake_case identifier used in config files and result JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentRole::Researcher => "researcher",
            AgentRole::Critic => "critic",
            AgentRole::Synthesizer => "synthesizer",
            AgentRole::DevilsAdvocate => "devils_advocate",
            AgentRole::Judge => "judge",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentRole::Researcher => "Researcher",
            AgentRole::Critic => "Critic",
            AgentRole::Synthesizer => "Synthesizer",
            AgentRole::DevilsAdvocate => "Devil's Advocate",
            AgentRole::Judge => "Judge",
        }
    }

    pub fn is_judge(&self) -> bool {
        matches!(self, AgentRole::Judge)
    }

    /// Transcript window for the given round
    ///
    /// The researcher opens the debate from the topic alone and only looks back
    /// once a previous round exists.
    pub fn context_window(&self, round: u32) -> ContextWindow {
        match self {
            AgentRole::Researcher if round <= 1 => ContextWindow::None,
            AgentRole::Researcher | AgentRole::Critic | AgentRole::DevilsAdvocate => {
                ContextWindow::Last(RECENT_WINDOW)
            }
            AgentRole::Synthesizer | AgentRole::Judge => ContextWindow::Full,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for AgentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != '\'')
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        AgentRole::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown agent '{s}', expected one of: researcher, critic, synthesizer, devils_advocate, judge"
                )
            })
    }
}
