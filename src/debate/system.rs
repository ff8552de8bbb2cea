//! Debate execution and history
//!
//! `DebateSystem` owns a provider handle and the records of every debate it
//! ran or loaded. A debate is a router loop over one `DebateState`: each turn
//! builds the agent for the scheduled role, feeds it the state's input and
//! history, and appends the reply. The judge's reply is parsed into rubric
//! ratings once the loop ends.

use super::graph;
use super::record::{DebateConfiguration, DebateRecord};
use super::router::{Router, RoutingDecision, Turn};
use super::state::{DebateMessage, DebateSetup, DebateState};
use super::topic::sanitize_topic;
use crate::agent::{AgentRole, AgentSettings, DebateAgent};
use crate::config::DebateConfig;
use crate::error::{DebateError, DebateResult};
use crate::evaluation::{detect_convergence, Ratings, RubricParser};
use crate::llm::{LlmProvider, LlmProviderFactory, TokenUsage};
use crate::observability::{agent_span, debate_span};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn, Instrument};

/// Per-run overrides; unset fields fall back to the `[debate]` config section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebateOptions {
    pub rounds: Option<u32>,
    pub agents: Option<Vec<AgentRole>>,
    pub temperature: Option<f32>,
    pub include_devils_advocate: bool,
    pub experiment_id: Option<String>,
}

impl DebateOptions {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = Some(rounds);
        self
    }

    pub fn with_agents(mut self, agents: Vec<AgentRole>) -> Self {
        self.agents = Some(agents);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_devils_advocate(mut self, include: bool) -> Self {
        self.include_devils_advocate = include;
        self
    }

    pub fn with_experiment_id(mut self, id: impl Into<String>) -> Self {
        self.experiment_id = Some(id.into());
        self
    }
}

/// Runs debates and keeps their records
pub struct DebateSystem {
    config: DebateConfig,
    provider: Arc<dyn LlmProvider>,
    parser: RubricParser,
    history: Vec<DebateRecord>,
    write_graphs: bool,
}

impl DebateSystem {
    pub fn new(config: DebateConfig, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            config,
            provider,
            parser: RubricParser::new(),
            history: Vec::new(),
            write_graphs: true,
        }
    }

    /// Build the configured provider, reading the API key from the environment
    pub fn from_config(config: DebateConfig) -> DebateResult<Self> {
        let provider = LlmProviderFactory::create(&config)?;
        Ok(Self::new(config, provider))
    }

    /// Toggle writing a Mermaid graph next to every record
    pub fn with_graph_output(mut self, enabled: bool) -> Self {
        self.write_graphs = enabled;
        self
    }

    pub fn config(&self) -> &DebateConfig {
        &self.config
    }

    /// Resolve options against configured defaults
    pub fn resolve_setup(&self, options: &DebateOptions) -> DebateResult<DebateSetup> {
        let defaults = &self.config.debate;
        DebateSetup::resolve(
            options.agents.as_deref().unwrap_or(&defaults.agents),
            options.rounds.unwrap_or(defaults.default_rounds),
            options.temperature.unwrap_or(defaults.default_temperature),
            options.include_devils_advocate,
        )
    }

    pub async fn run_debate(
        &mut self,
        topic: &str,
        options: DebateOptions,
    ) -> DebateResult<DebateRecord> {
        let topic = sanitize_topic(topic);
        if topic.is_empty() {
            return Err(DebateError::invalid_input(
                "topic is empty after sanitisation",
            ));
        }

        let setup = self.resolve_setup(&options)?;
        let experiment_id = options
            .experiment_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let span = debate_span!(
            experiment_id = %experiment_id,
            rounds = setup.rounds,
            agents = setup.agents().len()
        );
        let record = self
            .execute(topic, setup, experiment_id)
            .instrument(span)
            .await?;

        self.history.push(record.clone());
        Ok(record)
    }

    async fn execute(
        &self,
        topic: String,
        setup: DebateSetup,
        experiment_id: String,
    ) -> DebateResult<DebateRecord> {
        info!(topic = %topic, "Starting debate");
        let started = Instant::now();
        let settings = AgentSettings {
            model: self.config.llm.model.clone(),
            temperature: setup.temperature,
            max_tokens: self.config.llm.max_tokens,
        };

        let mut state = DebateState::new(topic, setup);
        let mut usage = TokenUsage::default();
        let mut verdict: Option<DebateMessage> = None;
        let mut previous: Option<Turn> = None;

        loop {
            let turn = match Router::new(&state.setup).next(previous) {
                RoutingDecision::Continue(turn) => turn,
                RoutingDecision::End => break,
            };
            state.enter_round(turn.round());

            let role = turn.role();
            let agent = DebateAgent::new(role, Arc::clone(&self.provider), settings.clone());
            let round = state.current_round();
            let reply = agent
                .respond(&state.topic, state.input_for(role), state.messages(), round)
                .instrument(agent_span!(role = role.as_str(), round))
                .await?;

            usage += reply.usage;
            state.push(role, reply.content);
            if matches!(turn, Turn::Judge { .. }) {
                verdict = state.messages().last().cloned();
            }
            previous = Some(turn);
        }

        let (ratings, convergence) = match &verdict {
            Some(v) => (self.parser.parse(&v.content), detect_convergence(&v.content)),
            None => (Ratings::default(), false),
        };
        let latency_secs = started.elapsed().as_secs_f64();

        let graph_path = if self.write_graphs {
            match graph::visualize(&state.setup, &experiment_id, &self.config.output.graphs_dir) {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!(error = %e, "Could not write debate graph");
                    None
                }
            }
        } else {
            None
        };

        info!(
            messages = state.messages().len(),
            convergence,
            latency_secs,
            tokens = usage.total_tokens,
            "Debate finished"
        );

        let configuration = DebateConfiguration::from_setup(&state.setup, &self.config.llm.model);
        let topic = state.topic.clone();
        let messages = state.into_messages();

        Ok(DebateRecord {
            experiment_id,
            timestamp: Utc::now(),
            topic,
            configuration,
            total_messages: messages.len(),
            messages,
            verdict,
            ratings,
            convergence,
            latency_secs,
            usage,
            graph_path,
        })
    }

    /// Run several configurations in order with ids `exp_1`, `exp_2`, ...
    pub async fn run_experiment(
        &mut self,
        topic: &str,
        configs: &[DebateOptions],
    ) -> DebateResult<Vec<DebateRecord>> {
        let mut records = Vec::with_capacity(configs.len());
        for (i, options) in configs.iter().enumerate() {
            info!("Running experiment {}/{}", i + 1, configs.len());
            let options = options.clone().with_experiment_id(format!("exp_{}", i + 1));
            records.push(self.run_debate(topic, options).await?);
        }
        Ok(records)
    }

    /// Write the flow graph for `options` without running a debate
    pub fn visualize_debate_graph(
        &self,
        options: &DebateOptions,
        experiment_id: &str,
        dir: Option<&Path>,
    ) -> DebateResult<PathBuf> {
        let setup = self.resolve_setup(options)?;
        graph::visualize(
            &setup,
            experiment_id,
            dir.unwrap_or(&self.config.output.graphs_dir),
        )
    }

    pub fn get_debate_by_id(&self, experiment_id: &str) -> Option<&DebateRecord> {
        self.history
            .iter()
            .find(|d| d.experiment_id == experiment_id)
    }

    pub fn all_debates(&self) -> &[DebateRecord] {
        &self.history
    }

    pub fn save_debate_to_file(&self, experiment_id: &str, path: &Path) -> DebateResult<()> {
        let record = self.get_debate_by_id(experiment_id).ok_or_else(|| {
            DebateError::invalid_input(format!("no debate with id '{experiment_id}'"))
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(record)?)?;
        Ok(())
    }

    /// Load a record and add it to the history unless its id is already known
    pub fn load_debate_from_file(&mut self, path: &Path) -> DebateResult<DebateRecord> {
        let content = std::fs::read_to_string(path)?;
        let record: DebateRecord = serde_json::from_str(&content)?;
        if self.get_debate_by_id(&record.experiment_id).is_none() {
            self.history.push(record.clone());
        }
        Ok(record)
    }
}
