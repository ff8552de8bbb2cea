//! Tests for logging configuration parsing and span helpers

use agent_debate::observability::logging::{parse_level, parse_span_flag, LogFormat};
use agent_debate::observability::{agent_span, debate_span, experiment_span, init_logging};
use tracing::Level;

#[test]
fn test_log_format_parse() {
    assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
    assert_eq!(LogFormat::parse("Compact"), LogFormat::Compact);
}

#[test]
fn test_log_format_parse_whitespace() {
    assert_eq!(LogFormat::parse("  json  "), LogFormat::Json);
    assert_eq!(LogFormat::parse("json\n"), LogFormat::Json);
    assert_eq!(LogFormat::parse("\tpretty"), LogFormat::Pretty);
}

#[test]
fn test_unknown_format_falls_back_to_compact() {
    for input in ["invalid", "", "xml", "123"] {
        assert_eq!(LogFormat::parse(input), LogFormat::Compact, "input: {input:?}");
    }
}

#[test]
fn test_level_parsing() {
    assert_eq!(parse_level("error"), Level::ERROR);
    assert_eq!(parse_level(" WARN "), Level::WARN);
    assert_eq!(parse_level("trace"), Level::TRACE);
    assert_eq!(parse_level("loud"), Level::INFO);
}

#[test]
fn test_span_flag_parsing() {
    assert!(parse_span_flag("true"));
    assert!(parse_span_flag("True"));
    assert!(!parse_span_flag("on"));
    assert!(!parse_span_flag(""));
}

#[test]
fn test_spans_can_be_entered_after_init() {
    init_logging(Level::DEBUG, LogFormat::Compact, true);

    let debate = debate_span!(experiment_id = "exp_1", rounds = 2u32);
    let _debate = debate.enter();
    let experiment = experiment_span!(name = "4_agents");
    let _experiment = experiment.enter();
    let agent = agent_span!(role = "critic", round = 1u32);
    let _agent = agent.enter();
    tracing::debug!("inside agent turn");
}
