//! Mock implementations for testing
//!
//! `MockLlmProvider` scripts completions without a network and records every
//! request it receives, so tests can assert on prompts, temperatures and turn
//! order.

use crate::llm::provider::{
    CompletionRequest, CompletionResponse, FinishReason, LlmError, LlmProvider, TokenUsage,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Scripted LLM provider
///
/// Responses are chosen in this order: a per-role response keyed by the
/// request's `agent_role` metadata, then the next entry of `responses`
/// (cycling), then "Mock response".
#[derive(Debug, Default, Clone)]
pub struct MockLlmProvider {
    pub responses: Vec<String>,
    pub role_responses: HashMap<String, String>,
    pub current_response: Arc<Mutex<usize>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub should_fail: bool,
    /// Fail only requests made on behalf of this role
    pub fail_for_role: Option<String>,
}

impl MockLlmProvider {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            ..Default::default()
        }
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    pub fn single_response(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Answer each role with a fixed text; unknown roles get "Mock response"
    pub fn by_role<I, K, V>(responses: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            role_responses: responses
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing_for_role(mut self, role: impl Into<String>) -> Self {
        self.fail_for_role = Some(role.into());
        self
    }

    /// Every request received so far, in order
    pub async fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// `agent_role` metadata of every request, in order
    pub async fn recorded_roles(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.metadata.get("agent_role").cloned().unwrap_or_default())
            .collect()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for MockLlmProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let role = request.metadata.get("agent_role").cloned();
        self.requests.lock().await.push(request);

        if self.should_fail {
            return Err(LlmError::RequestFailed("Mock LLM failure".to_string()));
        }
        if role.is_some() && role == self.fail_for_role {
            return Err(LlmError::ApiError(format!(
                "server error: mock failure for {}",
                role.unwrap_or_default()
            )));
        }

        let content = match role.as_ref().and_then(|r| self.role_responses.get(r)) {
            Some(content) => content.clone(),
            None if self.responses.is_empty() => "Mock response".to_string(),
            None => {
                let mut current = self.current_response.lock().await;
                let idx = *current % self.responses.len();
                *current += 1;
                self.responses[idx].clone()
            }
        };

        Ok(CompletionResponse {
            content: Some(content),
            model: "mock-model".to_string(),
            usage: TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            },
            finish_reason: FinishReason::Stop,
            metadata: HashMap::new(),
        })
    }

    async fn health_check(&self) -> Result<(), LlmError> {
        if self.should_fail {
            Err(LlmError::RequestFailed(
                "Mock health check failure".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}
