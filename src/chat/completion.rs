//! Chat-completion service abstraction and OpenAI implementation.

use super::messages::{ChatRole, ChatTurn};
use crate::error::{Result, SamleError};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Token usage reported by the completion service.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// A completed model response.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub usage: Option<CompletionUsage>,
}

/// External chat-completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion over an ordered sequence of turns.
    async fn complete(
        &self,
        turns: &[ChatTurn],
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<CompletionResponse>;
}

/// OpenAI-backed completion service.
pub struct OpenAiCompletion {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl OpenAiCompletion {
    pub fn new() -> Self {
        Self {
            client: create_client(),
        }
    }
}

impl Default for OpenAiCompletion {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a [`ChatTurn`] into the OpenAI request message type, preserving order
/// at the call site.
fn to_request_message(turn: &ChatTurn) -> Result<ChatCompletionRequestMessage> {
    let content = turn.text().to_string();
    let message = match turn.role {
        ChatRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| SamleError::Completion(e.to_string()))?
            .into(),
        ChatRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| SamleError::Completion(e.to_string()))?
            .into(),
        ChatRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| SamleError::Completion(e.to_string()))?
            .into(),
    };
    Ok(message)
}

#[async_trait]
impl CompletionService for OpenAiCompletion {
    #[instrument(skip(self, turns), fields(turns = turns.len()))]
    async fn complete(
        &self,
        turns: &[ChatTurn],
        model: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<CompletionResponse> {
        let messages = turns
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .temperature(temperature)
            .max_tokens(max_tokens)
            .build()
            .map_err(|e| SamleError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SamleError::OpenAI(format!("Chat API error: {}", e)))?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .ok_or_else(|| SamleError::Completion("Empty response from model".to_string()))?;

        let usage = response.usage.map(|u| CompletionUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(
            tokens = usage.map(|u| u.total_tokens).unwrap_or(0),
            "Completion finished"
        );

        Ok(CompletionResponse { content, usage })
    }
}
