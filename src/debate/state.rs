//! Debate state: resolved agent setup plus the append-only transcript

use crate::agent::AgentRole;
use crate::config::{validate_rounds, validate_temperature};
use crate::error::{DebateError, DebateResult};
use serde::{Deserialize, Serialize};

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMessage {
    pub role: AgentRole,
    pub content: String,
    pub round: u32,
}

/// Agent line-up and limits for one debate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateSetup {
    /// Non-judge agents in speaking order; one pass is one round
    pub sequence: Vec<AgentRole>,
    /// Whether a judge closes the debate
    pub judge: bool,
    pub rounds: u32,
    pub temperature: f32,
    pub include_devils_advocate: bool,
}

impl DebateSetup {
    /// Split a configured agent list into the round sequence and the judge flag
    ///
    /// Duplicates are dropped keeping the first occurrence. When a Devil's
    /// Advocate is requested but not listed it speaks right before the
    /// Synthesizer, or last if there is none.
    pub fn resolve(
        agents: &[AgentRole],
        rounds: u32,
        temperature: f32,
        include_devils_advocate: bool,
    ) -> DebateResult<Self> {
        validate_rounds(rounds)?;
        validate_temperature("temperature", temperature)?;

        let mut sequence: Vec<AgentRole> = Vec::with_capacity(agents.len() + 1);
        let mut judge = false;
        for &role in agents {
            if role.is_judge() {
                judge = true;
            } else if !sequence.contains(&role) {
                sequence.push(role);
            }
        }

        if include_devils_advocate && !sequence.contains(&AgentRole::DevilsAdvocate) {
            match sequence.iter().position(|r| *r == AgentRole::Synthesizer) {
                Some(idx) => sequence.insert(idx, AgentRole::DevilsAdvocate),
                None => sequence.push(AgentRole::DevilsAdvocate),
            }
        }

        if sequence.is_empty() && !judge {
            return Err(DebateError::invalid_input(
                "a debate needs at least one agent",
            ));
        }

        Ok(Self {
            sequence,
            judge,
            rounds,
            temperature,
            include_devils_advocate,
        })
    }

    /// Full line-up including the judge, in speaking order
    pub fn agents(&self) -> Vec<AgentRole> {
        let mut agents = self.sequence.clone();
        if self.judge {
            agents.push(AgentRole::Judge);
        }
        agents
    }
}

/// Running state of a debate
#[derive(Debug, Clone)]
pub struct DebateState {
    pub topic: String,
    pub setup: DebateSetup,
    messages: Vec<DebateMessage>,
    current_round: u32,
}

impl DebateState {
    pub fn new(topic: impl Into<String>, setup: DebateSetup) -> Self {
        Self {
            topic: topic.into(),
            setup,
            messages: Vec::new(),
            current_round: 1,
        }
    }

    pub fn messages(&self) -> &[DebateMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<DebateMessage> {
        self.messages
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.setup.rounds
    }

    /// Move to `round`; rounds never go backwards
    pub fn enter_round(&mut self, round: u32) {
        if round > self.current_round {
            self.current_round = round;
        }
    }

    /// Append a reply tagged with the current round
    pub fn push(&mut self, role: AgentRole, content: impl Into<String>) {
        self.messages.push(DebateMessage {
            role,
            content: content.into(),
            round: self.current_round,
        });
    }

    /// Input handed to the next speaker
    ///
    /// The researcher always works from the topic; everyone else responds to
    /// the previous message, falling back to the topic when nothing was said yet.
    pub fn input_for(&self, role: AgentRole) -> &str {
        if role == AgentRole::Researcher {
            return &self.topic;
        }
        self.messages
            .last()
            .map(|m| m.content.as_str())
            .unwrap_or(&self.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AgentRole::*;

    #[test]
    fn test_resolve_default_lineup() {
        let setup =
            DebateSetup::resolve(&[Researcher, Critic, Synthesizer, Judge], 2, 0.7, false).unwrap();
        assert_eq!(setup.sequence, vec![Researcher, Critic, Synthesizer]);
        assert!(setup.judge);
        assert_eq!(setup.agents(), vec![Researcher, Critic, Synthesizer, Judge]);
    }

    #[test]
    fn test_devils_advocate_inserted_before_synthesizer() {
        let setup =
            DebateSetup::resolve(&[Researcher, Critic, Synthesizer, Judge], 2, 0.7, true).unwrap();
        assert_eq!(
            setup.sequence,
            vec![Researcher, Critic, DevilsAdvocate, Synthesizer]
        );
    }

    #[test]
    fn test_devils_advocate_appended_without_synthesizer() {
        let setup = DebateSetup::resolve(&[Researcher, Judge], 1, 0.7, true).unwrap();
        assert_eq!(setup.sequence, vec![Researcher, DevilsAdvocate]);
        assert!(setup.judge);
    }

    #[test]
    fn test_devils_advocate_not_duplicated() {
        let setup = DebateSetup::resolve(&[DevilsAdvocate, Researcher], 1, 0.7, true).unwrap();
        assert_eq!(setup.sequence, vec![DevilsAdvocate, Researcher]);
    }

    #[test]
    fn test_duplicates_dropped() {
        let setup = DebateSetup::resolve(&[Critic, Judge, Critic, Judge], 1, 0.7, false).unwrap();
        assert_eq!(setup.sequence, vec![Critic]);
        assert!(setup.judge);
    }

    #[test]
    fn test_judge_only_is_allowed() {
        let setup = DebateSetup::resolve(&[Judge], 1, 0.7, false).unwrap();
        assert!(setup.sequence.is_empty());
        assert!(setup.judge);
    }

    #[test]
    fn test_rejects_empty_lineup_zero_rounds_and_bad_temperature() {
        assert!(DebateSetup::resolve(&[], 1, 0.7, false).is_err());
        assert!(DebateSetup::resolve(&[Researcher], 0, 0.7, false).is_err());
        assert!(DebateSetup::resolve(&[Researcher], 1, 3.0, false).is_err());
    }

    #[test]
    fn test_state_appends_with_round() {
        let setup = DebateSetup::resolve(&[Researcher, Critic], 2, 0.7, false).unwrap();
        let mut state = DebateState::new("topic", setup);

        state.push(Researcher, "r1");
        state.enter_round(2);
        state.push(Critic, "c2");
        state.enter_round(1);

        assert_eq!(state.current_round(), 2);
        assert_eq!(state.messages()[0].round, 1);
        assert_eq!(state.messages()[1].round, 2);
    }

    #[test]
    fn test_input_selection() {
        let setup = DebateSetup::resolve(&[Critic, Researcher], 1, 0.7, false).unwrap();
        let mut state = DebateState::new("the topic", setup);

        assert_eq!(state.input_for(Critic), "the topic");
        state.push(Critic, "objection");
        assert_eq!(state.input_for(Researcher), "the topic");
        assert_eq!(state.input_for(Judge), "objection");
    }
}
