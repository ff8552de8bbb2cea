//! Agent Debate
//!
//! Scripted multi-agent debates over an OpenAI-compatible chat-completions
//! API. Agents with fixed roles (Researcher, Critic, Synthesizer, an optional
//! Devil's Advocate, and a Judge) take turns over a shared transcript for a
//! configured number of rounds. The judge's closing text is parsed into
//! 0-5 ratings on Evidence, Feasibility, Risks and Clarity, and an experiment
//! runner repeats debates under varied settings to compare the outcomes.
//!
//! # Quick Start
//!
//! ```rust
//! use agent_debate::agent::AgentRole;
//! use agent_debate::debate::{render_mermaid, DebateSetup, Router};
//! use agent_debate::evaluation::RubricParser;
//!
//! let setup = DebateSetup::resolve(
//!     &[AgentRole::Researcher, AgentRole::Critic, AgentRole::Judge],
//!     2,
//!     0.7,
//!     true,
//! )
//! .unwrap();
//!
//! // Two rounds of three speakers, then the judge
//! assert_eq!(Router::new(&setup).plan().len(), 7);
//! assert!(render_mermaid(&setup).contains("judge --> finish"));
//!
//! let ratings = RubricParser::new().parse("Evidence: 4/5\nClarity: 3 out of 5");
//! assert_eq!((ratings.evidence, ratings.clarity), (4, 3));
//! ```

pub mod agent;
pub mod config;
pub mod debate;
pub mod error;
pub mod evaluation;
pub mod experiments;
pub mod llm;
pub mod observability;
pub mod testing;

pub use config::{ConfigError, DebateConfig};
pub use debate::{DebateOptions, DebateRecord, DebateSystem};
pub use error::{DebateError, DebateResult};
pub use evaluation::{DebateEvaluator, Ratings, RubricParser};
pub use experiments::{ExperimentRunner, ExperimentSpec};
