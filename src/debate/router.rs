//! Turn routing
//!
//! The router walks the non-judge sequence once per round, loops back to the
//! first agent until the round budget is spent, then hands over to the judge
//! (if any) and ends.
//!
//! ```text
//! start ─► seq[0] ─► seq[1] ─► … ─► seq[n-1] ─┬─► seq[0]   (round < total)
//!                                              ├─► Judge    (rounds done, judge present)
//!                                              └─► End
//! ```

use super::state::DebateSetup;
use crate::agent::AgentRole;

/// One scheduled turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Agent {
        role: AgentRole,
        index: usize,
        round: u32,
    },
    Judge {
        round: u32,
    },
}

impl Turn {
    pub fn role(&self) -> AgentRole {
        match self {
            Turn::Agent { role, .. } => *role,
            Turn::Judge { .. } => AgentRole::Judge,
        }
    }

    pub fn round(&self) -> u32 {
        match self {
            Turn::Agent { round, .. } | Turn::Judge { round } => *round,
        }
    }
}

/// Routing decision after a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutingDecision {
    Continue(Turn),
    End,
}

/// Fixed-sequence router over a resolved setup
#[derive(Debug, Clone, Copy)]
pub struct Router<'a> {
    setup: &'a DebateSetup,
}

impl<'a> Router<'a> {
    pub fn new(setup: &'a DebateSetup) -> Self {
        Self { setup }
    }

    /// Decide what follows `previous`; `None` means the debate has not started
    pub fn next(&self, previous: Option<Turn>) -> RoutingDecision {
        let sequence = &self.setup.sequence;

        match previous {
            None => match sequence.first() {
                Some(&role) => RoutingDecision::Continue(Turn::Agent {
                    role,
                    index: 0,
                    round: 1,
                }),
                None => self.close(1),
            },
            Some(Turn::Agent { index, round, .. }) => {
                if let Some(&role) = sequence.get(index + 1) {
                    RoutingDecision::Continue(Turn::Agent {
                        role,
                        index: index + 1,
                        round,
                    })
                } else {
                    match sequence.first() {
                        Some(&role) if round < self.setup.rounds => {
                            RoutingDecision::Continue(Turn::Agent {
                                role,
                                index: 0,
                                round: round + 1,
                            })
                        }
                        _ => self.close(round),
                    }
                }
            }
            Some(Turn::Judge { .. }) => RoutingDecision::End,
        }
    }

    /// Every turn the debate will take, in order
    pub fn plan(&self) -> Vec<Turn> {
        let mut turns = Vec::new();
        let mut previous = None;
        while let RoutingDecision::Continue(turn) = self.next(previous) {
            turns.push(turn);
            previous = Some(turn);
        }
        turns
    }

    fn close(&self, round: u32) -> RoutingDecision {
        if self.setup.judge {
            RoutingDecision::Continue(Turn::Judge { round })
        } else {
            RoutingDecision::End
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AgentRole::*;

    fn roles(setup: &DebateSetup) -> Vec<(AgentRole, u32)> {
        Router::new(setup)
            .plan()
            .iter()
            .map(|t| (t.role(), t.round()))
            .collect()
    }

    #[test]
    fn test_two_rounds_then_judge() {
        let setup =
            DebateSetup::resolve(&[Researcher, Critic, Synthesizer, Judge], 2, 0.7, false).unwrap();
        assert_eq!(
            roles(&setup),
            vec![
                (Researcher, 1),
                (Critic, 1),
                (Synthesizer, 1),
                (Researcher, 2),
                (Critic, 2),
                (Synthesizer, 2),
                (Judge, 2),
            ]
        );
    }

    #[test]
    fn test_single_round_without_judge_ends() {
        let setup = DebateSetup::resolve(&[Researcher, Critic], 1, 0.7, false).unwrap();
        assert_eq!(roles(&setup), vec![(Researcher, 1), (Critic, 1)]);
    }

    #[test]
    fn test_judge_only_debate() {
        let setup = DebateSetup::resolve(&[Judge], 3, 0.7, false).unwrap();
        assert_eq!(roles(&setup), vec![(Judge, 1)]);
    }

    #[test]
    fn test_researcher_and_judge_three_rounds() {
        let setup = DebateSetup::resolve(&[Researcher, Judge], 3, 0.7, false).unwrap();
        assert_eq!(
            roles(&setup),
            vec![(Researcher, 1), (Researcher, 2), (Researcher, 3), (Judge, 3)]
        );
    }

    #[test]
    fn test_judge_is_terminal() {
        let setup = DebateSetup::resolve(&[Researcher, Judge], 1, 0.7, false).unwrap();
        let router = Router::new(&setup);
        assert_eq!(
            router.next(Some(Turn::Judge { round: 1 })),
            RoutingDecision::End
        );
    }

    #[test]
    fn test_agent_turn_on_judge_only_setup_closes() {
        let setup = DebateSetup::resolve(&[Judge], 3, 0.7, false).unwrap();
        let stray = Turn::Agent {
            role: Critic,
            index: 0,
            round: 1,
        };
        assert_eq!(
            Router::new(&setup).next(Some(stray)),
            RoutingDecision::Continue(Turn::Judge { round: 1 })
        );

        let no_judge = DebateSetup {
            judge: false,
            ..setup
        };
        assert_eq!(
            Router::new(&no_judge).next(Some(stray)),
            RoutingDecision::End
        );
    }

    #[test]
    fn test_turn_count_matches_rounds_times_sequence() {
        for rounds in 1..=4 {
            let setup = DebateSetup::resolve(
                &[Researcher, Critic, Synthesizer, Judge],
                rounds,
                0.7,
                true,
            )
            .unwrap();
            let plan = Router::new(&setup).plan();
            assert_eq!(plan.len(), rounds as usize * 4 + 1);
            assert_eq!(plan.last().map(|t| t.role()), Some(Judge));
        }
    }
}
