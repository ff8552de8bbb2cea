//! LLM provider abstraction layer
//!
//! Agents talk to models only through the `LlmProvider` trait, so debates can
//! run against any OpenAI-compatible endpoint or a scripted mock in tests.

pub mod provider;
pub mod providers;

pub use provider::*;
pub use providers::*;
