//! Configuration loading and validation tests
//!
//! Tests focus on observable behaviour: defaults, overrides, custom experiment
//! suites and the errors reported for bad files.

use agent_debate::agent::AgentRole;
use agent_debate::config::{ConfigError, DebateConfig};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{content}").unwrap();
    temp_file
}

#[test]
fn test_full_config_loads() {
    let file = write_config(
        r#"
[llm]
provider = "openai"
model = "gpt-4o-mini"
base_url = "https://api.openai.com/v1"
api_key_env = "OPENAI_API_KEY"
max_tokens = 800
timeout_secs = 30

[debate]
default_rounds = 3
default_temperature = 0.5
low_temperature = 0.1
high_temperature = 1.2
agents = ["researcher", "critic", "devils_advocate", "synthesizer", "judge"]

[output]
results_dir = "out/results"
deliverables_dir = "out"
graphs_dir = "out/graphs"
"#,
    );

    let config = DebateConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
    assert_eq!(config.llm.max_tokens, 800);
    assert_eq!(config.llm.timeout_secs, 30);
    assert_eq!(config.debate.default_rounds, 3);
    assert_eq!(config.debate.high_temperature, 1.2);
    assert_eq!(config.debate.agents.len(), 5);
    assert_eq!(config.debate.agents[2], AgentRole::DevilsAdvocate);
    assert_eq!(config.output.graphs_dir, PathBuf::from("out/graphs"));
    assert!(config.experiments.is_empty());
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = DebateConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config, DebateConfig::default());
    assert_eq!(config.llm.model, "glm-4.6");
    assert_eq!(config.llm.base_url, "https://api.z.ai/api/coding/paas/v4");
    assert_eq!(config.llm.api_key_env, "ZAI_API_KEY");
    assert_eq!(config.debate.default_rounds, 2);
    assert_eq!(config.debate.default_temperature, 0.7);
    assert_eq!(
        config.debate.agents,
        vec![
            AgentRole::Researcher,
            AgentRole::Critic,
            AgentRole::Synthesizer,
            AgentRole::Judge
        ]
    );
}

#[test]
fn test_custom_experiment_suite() {
    let file = write_config(
        r#"
[[experiments]]
name = "lean"
description = "Researcher straight to judge"
agents = ["researcher", "judge"]
rounds = 1

[[experiments]]
name = "contrarian"
include_devils_advocate = true
temperature = 0.9
"#,
    );

    let config = DebateConfig::load_from_file(file.path()).unwrap();

    assert_eq!(config.experiments.len(), 2);
    assert_eq!(config.experiments[0].name, "lean");
    assert_eq!(config.experiments[0].rounds, 1);
    assert_eq!(config.experiments[1].agents.len(), 4);
    assert!(config.experiments[1].include_devils_advocate);
}

#[test]
fn test_invalid_experiment_is_rejected() {
    let file = write_config(
        r#"
[[experiments]]
name = "no rounds"
rounds = 0
"#,
    );

    let result = DebateConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_unknown_agent_is_a_parse_error() {
    let file = write_config(
        r#"
[debate]
agents = ["researcher", "moderator"]
"#,
    );

    let result = DebateConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_out_of_range_temperature_is_rejected() {
    let file = write_config(
        r#"
[debate]
high_temperature = 2.5
"#,
    );

    let result = DebateConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_invalid_base_url_is_rejected() {
    let file = write_config(
        r#"
[llm]
base_url = "not a url"
"#,
    );

    let result = DebateConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_malformed_toml_is_reported() {
    let file = write_config("[debate\ndefault_rounds = ");
    let result = DebateConfig::load_from_file(file.path());
    assert!(matches!(result, Err(ConfigError::TomlParse(_))));
}

#[test]
fn test_missing_file_is_reported() {
    let result = DebateConfig::load_from_file(std::path::Path::new("/nonexistent/debate.toml"));
    assert!(matches!(result, Err(ConfigError::FileRead(_))));
}

#[test]
fn test_environment_overrides() {
    let config = DebateConfig::from_lookup(|name| match name {
        "GLM_MODEL" => Some("glm-4.5".to_string()),
        "DEFAULT_ROUNDS" => Some("4".to_string()),
        "LOW_TEMPERATURE" => Some("0.05".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.llm.model, "glm-4.5");
    assert_eq!(config.debate.default_rounds, 4);
    assert_eq!(config.debate.low_temperature, 0.05);
    assert_eq!(config.debate.high_temperature, 0.9);
}

#[test]
fn test_environment_values_are_validated() {
    let result = DebateConfig::from_lookup(|name| {
        (name == "DEFAULT_ROUNDS").then(|| "zero".to_string())
    });
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));

    let result = DebateConfig::from_lookup(|name| {
        (name == "DEFAULT_TEMPERATURE").then(|| "3.0".to_string())
    });
    assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
}

#[test]
fn test_missing_api_key_is_reported() {
    let mut config = DebateConfig::default();
    config.llm.api_key_env = "AGENT_DEBATE_TEST_KEY_THAT_IS_NEVER_SET".to_string();

    assert!(matches!(
        config.get_llm_api_key(),
        Err(ConfigError::EnvVarNotFound(_))
    ));
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = DebateConfig::default();
    let rendered = toml::to_string_pretty(&config).unwrap();
    let parsed: DebateConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}
