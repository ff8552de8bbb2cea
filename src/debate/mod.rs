//! Debate orchestration
//!
//! ```text
//! DebateSystem::run_debate
//!   ├─ sanitize_topic
//!   ├─ DebateSetup::resolve ──► DebateState
//!   ├─ Router::next ──► DebateAgent::respond ──► DebateState::push   (repeat)
//!   └─ judge verdict ──► RubricParser ──► DebateRecord
//! ```

pub mod compare;
pub mod graph;
pub mod record;
pub mod router;
pub mod state;
pub mod system;
pub mod topic;

pub use compare::{compare_experiments, ExperimentComparison};
pub use graph::{render_mermaid, visualize};
pub use record::{DebateConfiguration, DebateRecord};
pub use router::{Router, RoutingDecision, Turn};
pub use state::{DebateMessage, DebateSetup, DebateState};
pub use system::{DebateOptions, DebateSystem};
pub use topic::sanitize_topic;
