//! Experiment definitions and the standard comparison suite

use crate::agent::AgentRole;
use crate::config::{
    default_agents, validate_rounds, validate_temperature, ConfigError, DebateConfig, DebateSection,
};
use crate::debate::DebateOptions;
use serde::{Deserialize, Serialize};

/// Pairs of experiments compared head to head: (key, baseline, variant)
pub const COMPARISON_PAIRS: [(&str, &str, &str); 4] = [
    ("agents_2_vs_4", "2_agents", "4_agents"),
    ("rounds_1_vs_3", "1_round", "3_rounds"),
    ("devils_advocate", "without_devils_advocate", "with_devils_advocate"),
    ("temperature", "low_temperature", "high_temperature"),
];

/// One debate configuration to run as part of a suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_agents", alias = "agent_types")]
    pub agents: Vec<AgentRole>,
    #[serde(default = "default_rounds")]
    pub rounds: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default)]
    pub include_devils_advocate: bool,
}

fn default_rounds() -> u32 {
    2
}

fn default_temperature() -> f32 {
    0.7
}

impl ExperimentSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            agents: default_agents(),
            rounds: default_rounds(),
            temperature: default_temperature(),
            include_devils_advocate: false,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "experiment name must not be empty".to_string(),
            ));
        }
        // Names end up in file names
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::InvalidConfig(format!(
                "experiment name '{}' may only contain letters, digits, '_' and '-'",
                self.name
            )));
        }
        if self.agents.is_empty() {
            return Err(ConfigError::InvalidConfig(format!(
                "experiment '{}' needs at least one agent",
                self.name
            )));
        }
        validate_rounds(self.rounds)?;
        validate_temperature(&format!("experiment '{}' temperature", self.name), self.temperature)
    }

    /// Debate options for this experiment; the name doubles as experiment id
    pub fn to_options(&self) -> DebateOptions {
        DebateOptions::default()
            .with_agents(self.agents.clone())
            .with_rounds(self.rounds)
            .with_temperature(self.temperature)
            .with_devils_advocate(self.include_devils_advocate)
            .with_experiment_id(self.name.clone())
    }
}

/// The four baseline/variant pairs; `short` keeps only the agent-count pair
pub fn standard_suite(debate: &DebateSection, short: bool) -> Vec<ExperimentSpec> {
    use AgentRole::*;
    let temperature = debate.default_temperature;
    let experiment = |name: &str, description: &str| ExperimentSpec {
        temperature,
        ..ExperimentSpec::new(name, description)
    };

    let mut suite = vec![
        ExperimentSpec {
            agents: vec![Researcher, Judge],
            ..experiment("2_agents", "Debate with 2 agents (Researcher, Judge)")
        },
        experiment(
            "4_agents",
            "Debate with 4 agents (Researcher, Critic, Synthesizer, Judge)",
        ),
    ];
    if short {
        return suite;
    }

    suite.extend([
        ExperimentSpec {
            rounds: 1,
            ..experiment("1_round", "Debate with 1 round")
        },
        ExperimentSpec {
            rounds: 3,
            ..experiment("3_rounds", "Debate with 3 rounds")
        },
        experiment("without_devils_advocate", "Debate without Devil's Advocate"),
        ExperimentSpec {
            include_devils_advocate: true,
            ..experiment("with_devils_advocate", "Debate with Devil's Advocate")
        },
        ExperimentSpec {
            temperature: debate.low_temperature,
            ..experiment(
                "low_temperature",
                &format!("Debate with low temperature ({})", debate.low_temperature),
            )
        },
        ExperimentSpec {
            temperature: debate.high_temperature,
            ..experiment(
                "high_temperature",
                &format!("Debate with high temperature ({})", debate.high_temperature),
            )
        },
    ]);
    suite
}

/// Configured `[[experiments]]`, or the standard suite when none are defined
pub fn suite_for(config: &DebateConfig, short: bool) -> Vec<ExperimentSpec> {
    if config.experiments.is_empty() {
        standard_suite(&config.debate, short)
    } else {
        config.experiments.clone()
    }
}
