//! Generation provider trait and types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// Author of a message sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub temperature: f32,
    /// Nucleus sampling threshold.
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl GenerationParams {
    /// Parameters for conversational replies.
    pub const fn chat() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 1024,
        }
    }

    /// Parameters for the longer narrative analysis of assessment results.
    pub const fn analysis() -> Self {
        Self {
            max_output_tokens: 2048,
            ..Self::chat()
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::chat()
    }
}

/// A text generation backend.
///
/// Implementations make a single attempt per call and report every failure
/// as an [`LlmError`]; callers decide how to recover.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short provider identifier used in errors and logs.
    fn name(&self) -> &str;

    /// Model the provider sends requests to.
    fn model_name(&self) -> &str;

    /// Generate a reply to `messages`, oldest first.
    async fn generate(
        &self,
        messages: &[ChatMessage],
        params: &GenerationParams,
    ) -> Result<String, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_params_only_raise_token_budget() {
        let chat = GenerationParams::chat();
        let analysis = GenerationParams::analysis();
        assert_eq!(analysis.max_output_tokens, 2048);
        assert_eq!(chat.max_output_tokens, 1024);
        assert_eq!(analysis.temperature, chat.temperature);
        assert_eq!(analysis.top_p, chat.top_p);
        assert_eq!(analysis.top_k, chat.top_k);
    }

    #[test]
    fn message_constructors_set_role() {
        assert_eq!(ChatMessage::user("hi").role, Role::User);
        assert_eq!(ChatMessage::assistant("hello").role, Role::Assistant);
    }
}
