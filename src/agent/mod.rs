//! Debate agents
//!
//! An agent is a role plus a provider handle. Roles own the prompt templates
//! and transcript windows; `DebateAgent` turns them into completion requests.

pub mod debate_agent;
pub mod prompts;
pub mod role;

pub use debate_agent::{AgentReply, AgentSettings, DebateAgent};
pub use role::{AgentRole, ContextWindow, RECENT_WINDOW};
