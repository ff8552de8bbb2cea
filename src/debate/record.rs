//! Persistent outcome of one debate run

use super::state::{DebateMessage, DebateSetup};
use crate::agent::AgentRole;
use crate::evaluation::Ratings;
use crate::llm::TokenUsage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings a debate actually ran with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateConfiguration {
    /// Resolved line-up in speaking order, judge last
    pub agents: Vec<AgentRole>,
    pub rounds: u32,
    pub temperature: f32,
    pub include_devils_advocate: bool,
    pub model: String,
}

impl DebateConfiguration {
    pub fn from_setup(setup: &DebateSetup, model: impl Into<String>) -> Self {
        Self {
            agents: setup.agents(),
            rounds: setup.rounds,
            temperature: setup.temperature,
            include_devils_advocate: setup.include_devils_advocate,
            model: model.into(),
        }
    }
}

/// Everything recorded about a finished debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateRecord {
    pub experiment_id: String,
    pub timestamp: DateTime<Utc>,
    pub topic: String,
    pub configuration: DebateConfiguration,
    pub messages: Vec<DebateMessage>,
    /// Judge's closing message; absent when the line-up has no judge
    pub verdict: Option<DebateMessage>,
    pub ratings: Ratings,
    pub convergence: bool,
    pub latency_secs: f64,
    pub total_messages: usize,
    #[serde(default)]
    pub usage: TokenUsage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graph_path: Option<PathBuf>,
}

impl DebateRecord {
    pub fn verdict_text(&self) -> &str {
        self.verdict
            .as_ref()
            .map(|v| v.content.as_str())
            .unwrap_or("")
    }

    /// Messages spoken by `role`, in order
    pub fn messages_by(&self, role: AgentRole) -> impl Iterator<Item = &DebateMessage> {
        self.messages.iter().filter(move |m| m.role == role)
    }
}
