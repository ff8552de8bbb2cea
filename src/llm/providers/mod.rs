//! LLM provider implementations
//!
//! This module contains concrete implementations of the LlmProvider trait
//! and the factory that picks one from configuration.

pub mod openai;

pub use openai::*;

use crate::config::{ConfigError, DebateConfig};
use crate::llm::provider::LlmProvider;
use std::sync::Arc;
use std::time::Duration;

/// Provider factory for creating LLM providers from configuration
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Build the provider named by `llm.provider`, resolving the API key from the environment
    pub fn create(config: &DebateConfig) -> Result<Arc<dyn LlmProvider>, ConfigError> {
        let api_key = config.get_llm_api_key()?;
        Self::create_with_key(config, api_key)
    }

    /// Build the provider with an explicit API key
    pub fn create_with_key(
        config: &DebateConfig,
        api_key: String,
    ) -> Result<Arc<dyn LlmProvider>, ConfigError> {
        match config.llm.provider.as_str() {
            "openai" | "openai-compatible" => {
                let openai_config = OpenAiConfig {
                    api_key,
                    base_url: config.llm.base_url.trim_end_matches('/').to_string(),
                    timeout: Duration::from_secs(config.llm.timeout_secs),
                };
                let provider = OpenAiProvider::new(openai_config)
                    .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;
                Ok(Arc::new(provider))
            }
            provider => Err(ConfigError::InvalidConfig(format!(
                "Unsupported LLM provider: {provider}"
            ))),
        }
    }
}
