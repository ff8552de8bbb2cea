//! Structured logging using the tracing crate
//!
//! Logs go to stderr so that stdout stays free for debate transcripts and
//! JSON reports.
//!
//! ## Environment Variables
//!
//! - `LOG_LEVEL`: ERROR, WARN, INFO, DEBUG, TRACE - defaults to INFO
//! - `LOG_FORMAT`: json, pretty, compact - defaults to compact
//! - `LOG_SPANS`: emit span open/close events (true/false) - defaults to false
//! - `RUST_LOG`: overrides filtering entirely (env_logger syntax)
//!
//! ```bash
//! # Machine-readable run log
//! LOG_FORMAT=json agent-debate experiments --topic "Universal basic income"
//!
//! # Follow every agent turn
//! LOG_LEVEL=DEBUG LOG_SPANS=true agent-debate run --topic "Nuclear power"
//! ```

use std::env;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Dependencies that are noisy below WARN
const QUIET_TARGETS: [&str; 4] = ["hyper=warn", "reqwest=warn", "rustls=warn", "tokio=warn"];

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event
    Json,
    /// Multi-line, coloured
    Pretty,
    /// One line per event, coloured
    Compact,
}

impl LogFormat {
    /// Unknown values fall back to compact
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

/// Unknown values fall back to INFO
pub fn parse_level(s: &str) -> Level {
    match s.trim().to_uppercase().as_str() {
        "ERROR" => Level::ERROR,
        "WARN" => Level::WARN,
        "DEBUG" => Level::DEBUG,
        "TRACE" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Only a literal "true" (any case) enables span events
pub fn parse_span_flag(s: &str) -> bool {
    s.trim().eq_ignore_ascii_case("true")
}

fn build_filter(level: Level) -> EnvFilter {
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    QUIET_TARGETS
        .iter()
        .filter_map(|directive| directive.parse().ok())
        .fold(EnvFilter::new(level.to_string()), |filter, directive| {
            filter.add_directive(directive)
        })
}

fn span_events(include_spans: bool) -> FmtSpan {
    if include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init_logging(level: Level, format: LogFormat, include_spans: bool) {
    let registry = tracing_subscriber::registry().with(build_filter(level));

    let result = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events(include_spans)),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_ansi(true)
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events(include_spans)),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_ansi(true)
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_span_events(span_events(include_spans)),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}

/// Initialize logging from `LOG_LEVEL`, `LOG_FORMAT` and `LOG_SPANS`
pub fn init_default_logging() {
    let level = parse_level(&env::var("LOG_LEVEL").unwrap_or_default());
    let format = LogFormat::parse(&env::var("LOG_FORMAT").unwrap_or_default());
    let include_spans = parse_span_flag(&env::var("LOG_SPANS").unwrap_or_default());

    init_logging(level, format, include_spans);
}

/// Span wrapping a whole debate run
#[macro_export]
macro_rules! debate_span {
    ($($field:tt)*) => {
        tracing::info_span!("debate", $($field)*)
    };
}

/// Span wrapping one agent turn
#[macro_export]
macro_rules! agent_span {
    ($($field:tt)*) => {
        tracing::info_span!("agent_turn", $($field)*)
    };
}

/// Span wrapping one experiment of a suite
#[macro_export]
macro_rules! experiment_span {
    ($($field:tt)*) => {
        tracing::info_span!("experiment", $($field)*)
    };
}

pub use {agent_span, debate_span, experiment_span};
