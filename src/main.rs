//! Agent Debate - command line entry point

use agent_debate::agent::AgentRole;
use agent_debate::config::DebateConfig;
use agent_debate::debate::{visualize, DebateOptions, DebateRecord, DebateSetup, DebateSystem};
use agent_debate::evaluation::DebateEvaluator;
use agent_debate::experiments::{generate_excerpts, ExperimentRunner, SuiteResults};
use agent_debate::observability::logging::{parse_span_flag, LogFormat};
use agent_debate::observability::{init_default_logging, init_logging};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn, Level};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Multi-agent LLM debates with rubric scoring
#[derive(Parser)]
#[command(name = "agent-debate")]
#[command(about = "Run multi-agent LLM debates and compare experiment outcomes")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", env = "DEBATE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single debate and print the transcript
    Run {
        /// Debate topic
        #[arg(short, long)]
        topic: String,

        /// Number of rounds
        #[arg(short, long)]
        rounds: Option<u32>,

        /// Comma-separated agent roles, e.g. researcher,critic,judge
        #[arg(short, long, value_delimiter = ',')]
        agents: Option<Vec<AgentRole>>,

        /// Sampling temperature
        #[arg(long)]
        temperature: Option<f32>,

        /// Add a Devil's Advocate before the Synthesizer
        #[arg(long)]
        devils_advocate: bool,

        /// Write the debate record as JSON
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Run the experiment suite and write results, comparison and excerpts
    Experiments {
        /// Debate topic
        #[arg(short, long)]
        topic: String,

        /// Only compare 2 vs 4 agents
        #[arg(long)]
        short: bool,

        /// Directory for the excerpts file
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Number of excerpts to keep
        #[arg(long, default_value_t = 3)]
        excerpts: usize,
    },
    /// Write the Mermaid flow graph of a debate configuration
    Graph {
        #[arg(short, long, value_delimiter = ',')]
        agents: Option<Vec<AgentRole>>,

        #[arg(short, long)]
        rounds: Option<u32>,

        #[arg(long)]
        devils_advocate: bool,

        /// Graph identifier used in the file name
        #[arg(long, default_value = "preview")]
        id: String,

        /// Output directory; defaults to output.graphs_dir
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },
    /// Validate configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_cli_logging(cli.verbose);

    info!("Starting agent-debate v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let result = tokio::select! {
        result = execute(cli.command, config) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Received Ctrl-C, aborting");
            Err("interrupted".into())
        }
    };

    if let Err(e) = result {
        error!("Command failed: {}", agent_debate::error::sanitize_error_message(&e.to_string()));
        process::exit(1);
    }
}

fn init_cli_logging(verbose: u8) {
    if verbose == 0 {
        init_default_logging();
        return;
    }
    let level = if verbose > 1 { Level::TRACE } else { Level::DEBUG };
    let format = LogFormat::parse(&std::env::var("LOG_FORMAT").unwrap_or_default());
    let spans = parse_span_flag(&std::env::var("LOG_SPANS").unwrap_or_default());
    init_logging(level, format, spans);
}

fn load_configuration(config_path: Option<&Path>) -> CliResult<DebateConfig> {
    if let Some(path) = config_path {
        info!("Loading configuration from: {}", path.display());
        return Ok(DebateConfig::load_from_file(path)?);
    }

    for candidate in ["debate.toml", "config/debate.toml"] {
        let path = Path::new(candidate);
        if path.exists() {
            info!("Loading configuration from: {}", path.display());
            return Ok(DebateConfig::load_from_file(path)?);
        }
    }

    info!("No configuration file found, using environment and defaults");
    Ok(DebateConfig::from_env()?)
}

async fn execute(command: Commands, config: DebateConfig) -> CliResult<()> {
    match command {
        Commands::Run {
            topic,
            rounds,
            agents,
            temperature,
            devils_advocate,
            output,
        } => {
            let options = DebateOptions {
                rounds,
                agents,
                temperature,
                include_devils_advocate: devils_advocate,
                experiment_id: None,
            };
            run_single(config, &topic, options, output.as_deref()).await
        }
        Commands::Experiments {
            topic,
            short,
            output,
            excerpts,
        } => run_experiments(config, &topic, short, output, excerpts).await,
        Commands::Graph {
            agents,
            rounds,
            devils_advocate,
            id,
            output,
        } => {
            let defaults = &config.debate;
            let setup = DebateSetup::resolve(
                agents.as_deref().unwrap_or(&defaults.agents),
                rounds.unwrap_or(defaults.default_rounds),
                defaults.default_temperature,
                devils_advocate,
            )?;
            let dir = output.unwrap_or_else(|| config.output.graphs_dir.clone());
            let path = visualize(&setup, &id, &dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Config { show } => {
            if show {
                println!("Current configuration:");
                println!("{}", toml::to_string_pretty(&config)?);
            }
            info!("Configuration validation complete");
            Ok(())
        }
    }
}

async fn run_single(
    config: DebateConfig,
    topic: &str,
    options: DebateOptions,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut system = DebateSystem::from_config(config)?;
    let record = system.run_debate(topic, options).await?;

    print_transcript(&record);
    let evaluation = DebateEvaluator::new().evaluate(&record);
    println!("{}", evaluation.summary);

    if let Some(path) = output {
        system.save_debate_to_file(&record.experiment_id, path)?;
        println!("Saved debate record to {}", path.display());
    }
    Ok(())
}

fn print_transcript(record: &DebateRecord) {
    println!("Topic: {}", record.topic);
    println!("{}", "=".repeat(50));
    for message in &record.messages {
        println!(
            "[round {}] {}:\n{}\n",
            message.round,
            message.role.display_name(),
            message.content
        );
    }
    println!("{}", "=".repeat(50));
    for (dimension, score) in record.ratings.iter() {
        println!("{dimension}: {score}/5");
    }
    println!(
        "Convergence: {}",
        if record.convergence { "Yes" } else { "No" }
    );
}

async fn run_experiments(
    config: DebateConfig,
    topic: &str,
    short: bool,
    output: Option<PathBuf>,
    excerpt_count: usize,
) -> CliResult<()> {
    let deliverables = output.unwrap_or_else(|| config.output.deliverables_dir.clone());
    let system = DebateSystem::from_config(config)?;
    let mut runner = ExperimentRunner::new(system);

    let results = runner.run_standard_experiments(topic, short).await?;
    print_suite_summary(&results);

    let excerpts = generate_excerpts(&results.experiments, excerpt_count);
    std::fs::create_dir_all(&deliverables)?;
    let path = deliverables.join(format!(
        "excerpts_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    std::fs::write(&path, serde_json::to_string_pretty(&excerpts)?)?;
    println!("Saved {} excerpts to {}", excerpts.len(), path.display());

    if results.experiments.is_empty() {
        return Err("every experiment failed".into());
    }
    Ok(())
}

fn print_suite_summary(results: &SuiteResults) {
    println!("Experiments on topic: {}", results.topic);
    println!("{}", "=".repeat(50));
    for result in &results.experiments {
        let evaluation = &result.evaluation;
        println!("{} - {}", result.experiment_name, result.description);
        println!("  Overall score: {:.1}/5.0", evaluation.overall_score);
        println!(
            "  Convergence: {}",
            if evaluation.convergence.achieved { "Yes" } else { "No" }
        );
        println!("  Latency: {:.1} seconds", evaluation.latency.seconds);
    }
    for failed in &results.failed {
        println!("{} - FAILED: {}", failed.experiment_name, failed.error);
    }

    if let Some(comparison) = &results.comparison {
        println!("{}", "-".repeat(50));
        println!("Average score: {:.2}", comparison.evaluations.average_score);
        println!(
            "Convergence rate: {:.0}%",
            comparison.evaluations.convergence_rate * 100.0
        );
        for (key, pair) in &comparison.experiment_comparisons {
            println!(
                "{key}: {} {:.1} vs {} {:.1} (difference {:+.1})",
                pair.baseline, pair.baseline_score, pair.variant, pair.variant_score, pair.difference
            );
        }
    }
}
