//! Experiment suite runs against a scripted provider
//!
//! Checks the suite order, result files, pairwise comparisons, failure
//! isolation between experiments, and transcript excerpts.

use agent_debate::agent::AgentRole;
use agent_debate::config::DebateConfig;
use agent_debate::debate::DebateSystem;
use agent_debate::experiments::{
    generate_excerpts, ExcerptKind, ExperimentRunner, ExperimentSpec, SuiteResults,
};
use agent_debate::testing::MockLlmProvider;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const VERDICT: &str = "Broad consensus emerged.\n\
                       Evidence: 4/5\n\
                       Feasibility: 4/5\n\
                       Risks: 3/5\n\
                       Clarity: 4/5";

fn scripted() -> MockLlmProvider {
    MockLlmProvider::by_role([
        ("researcher", "Studies show a 13% productivity gain."),
        ("critic", "There is a flaw: the sample was self-selected."),
        ("devils_advocate", "What if the gain disappears at scale?"),
        ("synthesizer", "Both sides agree measurement matters."),
        ("judge", VERDICT),
    ])
}

fn runner_with(mock: &MockLlmProvider, config: DebateConfig) -> (ExperimentRunner, TempDir) {
    let dir = TempDir::new().unwrap();
    let system = DebateSystem::new(config, Arc::new(mock.clone())).with_graph_output(false);
    (
        ExperimentRunner::with_results_dir(system, dir.path().join("results")),
        dir,
    )
}

fn json_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn test_short_suite_writes_results_and_compares_agent_counts() {
    let mock = scripted();
    let (mut runner, _dir) = runner_with(&mock, DebateConfig::default());

    let results = runner
        .run_standard_experiments("Should remote work be the default?", true)
        .await
        .unwrap();

    let names: Vec<_> = results
        .experiments
        .iter()
        .map(|r| r.experiment_name.as_str())
        .collect();
    assert_eq!(names, vec!["2_agents", "4_agents"]);
    assert!(results.failed.is_empty());
    assert_eq!(runner.system().all_debates().len(), 2);

    let two = &results.experiments[0];
    assert_eq!(two.debate_result.experiment_id, "2_agents");
    assert_eq!(
        two.configuration.agents,
        vec![AgentRole::Researcher, AgentRole::Judge]
    );
    assert!(two.evaluation.convergence.achieved);

    let comparison = results.comparison.as_ref().unwrap();
    assert_eq!(comparison.evaluations.overall_scores.len(), 2);
    assert_eq!(comparison.evaluations.convergence_rate, 1.0);
    assert_eq!(comparison.experiment_comparisons.len(), 1);

    let pair = &comparison.experiment_comparisons["agents_2_vs_4"];
    assert_eq!(pair.baseline, "2_agents");
    assert_eq!(pair.variant, "4_agents");
    assert_eq!(pair.difference, pair.variant_score - pair.baseline_score);

    let files = json_files(runner.results_dir());
    assert_eq!(files.len(), 3);
    assert!(files.iter().any(|f| f.starts_with("2_agents_")));
    assert!(files.iter().any(|f| f.starts_with("4_agents_")));
    let complete = files
        .iter()
        .find(|f| f.starts_with("complete_results_"))
        .unwrap();

    let saved: SuiteResults = serde_json::from_str(
        &std::fs::read_to_string(runner.results_dir().join(complete)).unwrap(),
    )
    .unwrap();
    assert_eq!(saved.topic, "Should remote work be the default?");
    assert_eq!(saved.experiments.len(), 2);
}

#[tokio::test]
async fn test_failed_experiment_does_not_stop_suite() {
    let mock = scripted().failing_for_role("devils_advocate");
    let (mut runner, _dir) = runner_with(&mock, DebateConfig::default());

    let results = runner
        .run_standard_experiments("Remote work", false)
        .await
        .unwrap();

    assert_eq!(results.experiments.len(), 7);
    assert_eq!(results.failed.len(), 1);
    assert_eq!(results.failed[0].experiment_name, "with_devils_advocate");
    assert!(!results.failed[0].error.is_empty());

    let comparison = results.comparison.as_ref().unwrap();
    assert!(comparison.experiment_comparisons.contains_key("agents_2_vs_4"));
    assert!(comparison.experiment_comparisons.contains_key("rounds_1_vs_3"));
    assert!(comparison.experiment_comparisons.contains_key("temperature"));
    assert!(!comparison.experiment_comparisons.contains_key("devils_advocate"));

    let low = &comparison.experiment_comparisons["temperature"];
    assert_eq!(low.baseline, "low_temperature");
}

#[tokio::test]
async fn test_suite_where_everything_fails_still_reports() {
    let mock = MockLlmProvider::with_failure();
    let (mut runner, _dir) = runner_with(&mock, DebateConfig::default());

    let results = runner
        .run_standard_experiments("Remote work", true)
        .await
        .unwrap();

    assert!(results.experiments.is_empty());
    assert_eq!(results.failed.len(), 2);
    assert!(results.comparison.is_none());

    let files = json_files(runner.results_dir());
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("complete_results_"));
}

#[tokio::test]
async fn test_configured_experiments_replace_standard_suite() {
    let mock = scripted();
    let mut config = DebateConfig::default();
    config.experiments = vec![ExperimentSpec {
        agents: vec![AgentRole::Critic, AgentRole::Judge],
        rounds: 1,
        ..ExperimentSpec::new("critic_only", "Critic straight to judge")
    }];
    let (mut runner, _dir) = runner_with(&mock, config);

    let results = runner
        .run_standard_experiments("Remote work", false)
        .await
        .unwrap();

    assert_eq!(results.experiments.len(), 1);
    assert_eq!(results.experiments[0].experiment_name, "critic_only");
    assert_eq!(mock.recorded_roles().await, vec!["critic", "judge"]);

    // No standard pair is present, so only the aggregate numbers remain
    let comparison = results.comparison.as_ref().unwrap();
    assert!(comparison.experiment_comparisons.is_empty());
}

#[tokio::test]
async fn test_invalid_experiment_is_rejected_before_running() {
    let mock = scripted();
    let (mut runner, _dir) = runner_with(&mock, DebateConfig::default());

    let specs = vec![
        ExperimentSpec::new("fine", ""),
        ExperimentSpec::new("../escape", "path in name"),
    ];
    assert!(runner.run_suite("Remote work", &specs).await.is_err());
    assert_eq!(mock.call_count().await, 0);
}

#[tokio::test]
async fn test_excerpts_from_suite_results() {
    let mock = scripted();
    let (mut runner, _dir) = runner_with(&mock, DebateConfig::default());

    let results = runner
        .run_standard_experiments("Remote work", true)
        .await
        .unwrap();
    let excerpts = generate_excerpts(&results.experiments, 3);

    assert_eq!(excerpts.len(), 3);

    assert_eq!(excerpts[0].experiment, "2_agents");
    assert!(matches!(excerpts[0].kind, ExcerptKind::Verdict { .. }));

    assert_eq!(excerpts[1].experiment, "4_agents");
    assert_eq!(excerpts[1].round, 1);
    match &excerpts[1].kind {
        ExcerptKind::CriticCatchingError {
            context,
            critic_response,
        } => {
            assert_eq!(context, "Studies show a 13% productivity gain....");
            assert!(critic_response.starts_with("There is a flaw"));
        }
        other => panic!("expected a critic excerpt, got {other:?}"),
    }

    assert!(matches!(excerpts[2].kind, ExcerptKind::Synthesis { .. }));
    assert!(generate_excerpts(&results.experiments, 0).is_empty());
}
