//! Configuration system for the debate runner
//!
//! Configuration comes from a TOML file (`debate.toml`) with every section
//! optional, or from environment variables when no file is present. Secrets
//! never live in the file: the API key is read at runtime from the variable
//! named by `llm.api_key_env`.

use crate::agent::AgentRole;
use crate::experiments::ExperimentSpec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder value shipped in sample `.env` files
const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DebateConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub debate: DebateSection,
    #[serde(default)]
    pub output: OutputSection,
    /// User-defined experiment suite; the standard suite is used when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub experiments: Vec<ExperimentSpec>,
}

/// LLM endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmSection {
    /// Wire format of the endpoint; only "openai" (chat completions) is built in
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable containing the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Debate defaults applied when a run does not override them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebateSection {
    #[serde(default = "default_rounds")]
    pub default_rounds: u32,
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,
    #[serde(default = "default_low_temperature")]
    pub low_temperature: f32,
    #[serde(default = "default_high_temperature")]
    pub high_temperature: f32,
    #[serde(default = "default_agents")]
    pub agents: Vec<AgentRole>,
}

/// Where result files land
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSection {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_deliverables_dir")]
    pub deliverables_dir: PathBuf,
    #[serde(default = "default_graphs_dir")]
    pub graphs_dir: PathBuf,
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "glm-4.6".to_string()
}

fn default_base_url() -> String {
    "https://api.z.ai/api/coding/paas/v4".to_string()
}

fn default_api_key_env() -> String {
    "ZAI_API_KEY".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_rounds() -> u32 {
    2
}

fn default_temperature() -> f32 {
    0.7
}

fn default_low_temperature() -> f32 {
    0.2
}

fn default_high_temperature() -> f32 {
    0.9
}

pub fn default_agents() -> Vec<AgentRole> {
    vec![
        AgentRole::Researcher,
        AgentRole::Critic,
        AgentRole::Synthesizer,
        AgentRole::Judge,
    ]
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("experiments/results")
}

fn default_deliverables_dir() -> PathBuf {
    PathBuf::from("Deliverables")
}

fn default_graphs_dir() -> PathBuf {
    PathBuf::from("Deliverables/graphs")
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DebateSection {
    fn default() -> Self {
        Self {
            default_rounds: default_rounds(),
            default_temperature: default_temperature(),
            low_temperature: default_low_temperature(),
            high_temperature: default_high_temperature(),
            agents: default_agents(),
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            deliverables_dir: default_deliverables_dir(),
            graphs_dir: default_graphs_dir(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DebateConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: DebateConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from defaults overridden by `lookup`
    ///
    /// Recognised variables: `GLM_MODEL`, `GLM_BASE_URL`, `DEFAULT_TEMPERATURE`,
    /// `LOW_TEMPERATURE`, `HIGH_TEMPERATURE`, `DEFAULT_ROUNDS`, `MAX_TOKENS`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = DebateConfig::default();

        if let Some(model) = lookup("GLM_MODEL") {
            config.llm.model = model;
        }
        if let Some(base_url) = lookup("GLM_BASE_URL") {
            config.llm.base_url = base_url;
        }
        if let Some(value) = lookup("MAX_TOKENS") {
            config.llm.max_tokens = parse_env_value("MAX_TOKENS", &value)?;
        }
        if let Some(value) = lookup("DEFAULT_ROUNDS") {
            config.debate.default_rounds = parse_env_value("DEFAULT_ROUNDS", &value)?;
        }
        if let Some(value) = lookup("DEFAULT_TEMPERATURE") {
            config.debate.default_temperature = parse_env_value("DEFAULT_TEMPERATURE", &value)?;
        }
        if let Some(value) = lookup("LOW_TEMPERATURE") {
            config.debate.low_temperature = parse_env_value("LOW_TEMPERATURE", &value)?;
        }
        if let Some(value) = lookup("HIGH_TEMPERATURE") {
            config.debate.high_temperature = parse_env_value("HIGH_TEMPERATURE", &value)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and cross-field consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.llm.base_url).map_err(|e| {
            ConfigError::InvalidConfig(format!("llm.base_url '{}': {e}", self.llm.base_url))
        })?;

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "llm.model must not be empty".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidConfig(
                "llm.max_tokens must be greater than zero".to_string(),
            ));
        }

        validate_rounds(self.debate.default_rounds)?;

        for (name, value) in [
            ("debate.default_temperature", self.debate.default_temperature),
            ("debate.low_temperature", self.debate.low_temperature),
            ("debate.high_temperature", self.debate.high_temperature),
        ] {
            validate_temperature(name, value)?;
        }

        if self.debate.agents.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "debate.agents must name at least one agent".to_string(),
            ));
        }

        for experiment in &self.experiments {
            experiment.validate()?;
        }

        Ok(())
    }

    /// Get LLM API key from environment variable
    pub fn get_llm_api_key(&self) -> Result<String, ConfigError> {
        let key = std::env::var(&self.llm.api_key_env)
            .map_err(|_| ConfigError::EnvVarNotFound(self.llm.api_key_env.clone()))?;

        if key.trim().is_empty() || key == PLACEHOLDER_API_KEY {
            return Err(ConfigError::InvalidConfig(format!(
                "{} must be set to a real API key",
                self.llm.api_key_env
            )));
        }

        Ok(key)
    }
}

/// Rounds must be at least one
pub fn validate_rounds(rounds: u32) -> Result<(), ConfigError> {
    if rounds == 0 {
        return Err(ConfigError::InvalidConfig(
            "rounds must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Sampling temperatures accepted by chat-completion endpoints
pub fn validate_temperature(name: &str, value: f32) -> Result<(), ConfigError> {
    if !(0.0..=2.0).contains(&value) {
        return Err(ConfigError::InvalidConfig(format!(
            "{name} must be between 0.0 and 2.0, got {value}"
        )));
    }
    Ok(())
}

fn parse_env_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidConfig(format!("{name} has invalid value '{value}'")))
}
