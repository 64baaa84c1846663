//! Generation backend integration.
//!
//! The only backend is Google's generative-language API. When no API key is
//! configured an [`UnconfiguredProvider`] stands in, so every exchange takes
//! the fallback path instead of failing at startup.

mod exchange;
mod gemini;
pub mod prompts;
mod provider;

pub use exchange::{
    ANALYSIS_FALLBACK, CHAT_FALLBACK, Exchange, ExchangeClient, ExchangeOutcome, ProcessingGate,
    ProcessingGuard, chat_messages,
};
pub use gemini::GeminiProvider;
pub use provider::{ChatMessage, GenerationParams, GenerationProvider, Role};

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LlmConfig;
use crate::error::LlmError;

/// Create the generation provider described by `config`.
pub fn create_provider(config: &LlmConfig) -> Result<Arc<dyn GenerationProvider>, LlmError> {
    match &config.api_key {
        Some(key) => {
            let provider = GeminiProvider::new(
                key.clone(),
                &config.model,
                &config.base_url,
                config.timeout,
            )?;
            tracing::info!("Using Gemini API (model: {})", config.model);
            Ok(Arc::new(provider))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY is not set; chat and analysis will use fallback replies");
            Ok(Arc::new(UnconfiguredProvider::new(&config.model)))
        }
    }
}

/// Provider used when no credentials are configured. Every call fails with
/// [`LlmError::AuthFailed`].
pub struct UnconfiguredProvider {
    model: String,
}

impl UnconfiguredProvider {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

#[async_trait]
impl GenerationProvider for UnconfiguredProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        _messages: &[ChatMessage],
        _params: &GenerationParams,
    ) -> Result<String, LlmError> {
        Err(LlmError::AuthFailed {
            provider: self.name().to_string(),
        })
    }
}
