//! A single role-bound LLM participant

use super::prompts;
use super::role::AgentRole;
use crate::debate::DebateMessage;
use crate::llm::provider::{
    CompletionRequest, LlmError, LlmProvider, Message, TokenUsage,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Model settings shared by every agent in one debate
#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Output of one agent turn
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub content: String,
    pub usage: TokenUsage,
}

/// Role-labelled LLM invocation
pub struct DebateAgent {
    role: AgentRole,
    provider: Arc<dyn LlmProvider>,
    settings: AgentSettings,
}

impl DebateAgent {
    pub fn new(role: AgentRole, provider: Arc<dyn LlmProvider>, settings: AgentSettings) -> Self {
        Self {
            role,
            provider,
            settings,
        }
    }

    pub fn role(&self) -> AgentRole {
        self.role
    }

    /// Build the completion request for one turn (pure function)
    pub fn build_request(
        &self,
        topic: &str,
        input: &str,
        history: &[DebateMessage],
        round: u32,
    ) -> CompletionRequest {
        let context = self.role.context_window(round).select(history);
        let user_prompt = prompts::user_prompt(self.role, topic, input, context);

        let mut metadata = HashMap::new();
        metadata.insert("agent_role".to_string(), self.role.as_str().to_string());
        metadata.insert("round".to_string(), round.to_string());

        CompletionRequest {
            messages: vec![
                Message::system(prompts::system_prompt(self.role)),
                Message::user(user_prompt),
            ],
            model: self.settings.model.clone(),
            max_tokens: Some(self.settings.max_tokens),
            temperature: Some(self.settings.temperature),
            metadata,
        }
    }

    /// Run one turn against the provider
    pub async fn respond(
        &self,
        topic: &str,
        input: &str,
        history: &[DebateMessage],
        round: u32,
    ) -> Result<AgentReply, LlmError> {
        let request = self.build_request(topic, input, history, round);
        let response = self.provider.complete(request).await?;

        let content = response
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                warn!(role = self.role.as_str(), "Provider returned an empty completion");
                LlmError::InvalidResponse(format!("empty completion for {}", self.role))
            })?;

        debug!(
            role = self.role.as_str(),
            round,
            chars = content.len(),
            tokens = response.usage.total_tokens,
            "Agent turn complete"
        );

        Ok(AgentReply {
            content,
            usage: response.usage,
        })
    }
}
