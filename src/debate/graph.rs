//! Mermaid rendering of a debate flow

use super::state::DebateSetup;
use crate::agent::AgentRole;
use crate::error::DebateResult;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

fn node(role: AgentRole) -> String {
    let label = role.display_name();
    if role.is_judge() {
        format!("{}{{{{\"{label}\"}}}}", role.as_str())
    } else {
        format!("{}[\"{label}\"]", role.as_str())
    }
}

/// Flowchart of the speaking order, the round loop-back edge and the judge
pub fn render_mermaid(setup: &DebateSetup) -> String {
    let mut out = String::from("flowchart TD\n");
    let _ = writeln!(out, "    start([Start])");
    for &role in &setup.sequence {
        let _ = writeln!(out, "    {}", node(role));
    }
    if setup.judge {
        let _ = writeln!(out, "    {}", node(AgentRole::Judge));
    }
    let _ = writeln!(out, "    finish([End])");

    let mut previous = "start";
    for &role in &setup.sequence {
        let _ = writeln!(out, "    {previous} --> {}", role.as_str());
        previous = role.as_str();
    }

    if let (Some(first), Some(last)) = (setup.sequence.first(), setup.sequence.last()) {
        if setup.rounds > 1 {
            let _ = writeln!(
                out,
                "    {} -. \"next round (of {})\" .-> {}",
                last.as_str(),
                setup.rounds,
                first.as_str()
            );
        }
    }

    if setup.judge {
        let judge = AgentRole::Judge.as_str();
        let _ = writeln!(out, "    {previous} --> {judge}");
        let _ = writeln!(out, "    {judge} --> finish");
    } else {
        let _ = writeln!(out, "    {previous} --> finish");
    }

    out
}

/// Write `graph_<id>.mmd` under `dir` and return its path
pub fn visualize(setup: &DebateSetup, experiment_id: &str, dir: &Path) -> DebateResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("graph_{experiment_id}.mmd"));
    std::fs::write(&path, render_mermaid(setup))?;
    debug!(path = %path.display(), "Wrote debate flow graph");
    Ok(path)
}
