//! Exchange client: the fail-soft boundary between the chat/results surfaces
//! and the generation backend.
//!
//! Internally every path is a `Result<String, LlmError>`. The public methods
//! convert failures into fixed fallback text so the caller always has
//! something to show, while [`ExchangeOutcome`] still records whether the
//! text came from the model.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::assessment::ResultsSnapshot;
use crate::conversation::{Speaker, Turn};
use crate::error::LlmError;
use crate::llm::prompts::{CHAT_PREAMBLE, analysis_prompt};
use crate::llm::provider::{ChatMessage, GenerationParams, GenerationProvider};

pub const CHAT_FALLBACK: &str =
    "I'm sorry, I'm having trouble responding right now. Please try again in a moment.";

pub const ANALYSIS_FALLBACK: &str =
    "We couldn't generate a personalized analysis at this time. Please try again later.";

/// Result of one exchange as seen by the UI.
#[derive(Debug)]
pub enum ExchangeOutcome {
    Reply(String),
    Fallback {
        text: &'static str,
        cause: LlmError,
    },
}

impl ExchangeOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::Reply(text) => text,
            Self::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Reply(text) => text,
            Self::Fallback { text, .. } => text.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    /// The failure that caused the fallback, if any.
    pub fn error(&self) -> Option<&LlmError> {
        match self {
            Self::Reply(_) => None,
            Self::Fallback { cause, .. } => Some(cause),
        }
    }

    fn from_result(result: Result<String, LlmError>, fallback: &'static str) -> Self {
        match result {
            Ok(text) => Self::Reply(text),
            Err(cause) => {
                tracing::warn!("Exchange failed, using fallback reply: {}", cause);
                Self::Fallback {
                    text: fallback,
                    cause,
                }
            }
        }
    }
}

/// "Processing" flag allowing one exchange at a time.
#[derive(Debug, Default)]
pub struct ProcessingGate {
    busy: AtomicBool,
}

impl ProcessingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag, or `None` if it is already set. The flag is cleared
    /// when the returned guard drops.
    pub fn try_acquire(&self) -> Option<ProcessingGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ProcessingGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

pub struct ProcessingGuard<'a> {
    gate: &'a ProcessingGate,
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Sends conversation windows and analysis prompts to a provider.
pub struct ExchangeClient {
    provider: Arc<dyn GenerationProvider>,
    gate: ProcessingGate,
}

impl ExchangeClient {
    pub fn new(provider: Arc<dyn GenerationProvider>) -> Self {
        Self {
            provider,
            gate: ProcessingGate::new(),
        }
    }

    /// Whether an exchange is in flight.
    pub fn is_processing(&self) -> bool {
        self.gate.is_busy()
    }

    /// Take the processing flag for one exchange.
    ///
    /// Fails with [`LlmError::Busy`] while another exchange holds it. The flag
    /// is released when the returned [`Exchange`] completes or is dropped.
    pub fn begin(&self) -> Result<Exchange<'_>, LlmError> {
        let guard = self.gate.try_acquire().ok_or(LlmError::Busy)?;
        Ok(Exchange {
            client: self,
            _guard: guard,
        })
    }

    /// Ask for the next assistant reply to `window` (oldest first).
    ///
    /// Only fails with [`LlmError::Busy`] when another exchange is still in
    /// flight. Every backend failure becomes [`CHAT_FALLBACK`].
    pub async fn exchange_chat(&self, window: &[Turn]) -> Result<ExchangeOutcome, LlmError> {
        Ok(self.begin()?.chat(window).await)
    }

    /// Ask for a narrative analysis of `snapshot`.
    ///
    /// Same contract as [`exchange_chat`](Self::exchange_chat), with
    /// [`ANALYSIS_FALLBACK`] as the fallback.
    pub async fn analyze_results(
        &self,
        snapshot: &ResultsSnapshot,
    ) -> Result<ExchangeOutcome, LlmError> {
        Ok(self.begin()?.analyze(snapshot).await)
    }

    async fn try_chat(&self, window: &[Turn]) -> Result<String, LlmError> {
        let messages = chat_messages(window);
        tracing::debug!(
            provider = self.provider.name(),
            model = self.provider.model_name(),
            turns = window.len(),
            "requesting chat reply"
        );
        self.provider
            .generate(&messages, &GenerationParams::chat())
            .await
    }

    async fn try_analyze(&self, snapshot: &ResultsSnapshot) -> Result<String, LlmError> {
        let messages = [ChatMessage::user(analysis_prompt(snapshot))];
        tracing::debug!(
            provider = self.provider.name(),
            model = self.provider.model_name(),
            "requesting results analysis"
        );
        self.provider
            .generate(&messages, &GenerationParams::analysis())
            .await
    }
}

/// One exchange that already holds the processing flag.
pub struct Exchange<'a> {
    client: &'a ExchangeClient,
    _guard: ProcessingGuard<'a>,
}

impl Exchange<'_> {
    pub async fn chat(self, window: &[Turn]) -> ExchangeOutcome {
        let result = self.client.try_chat(window).await;
        ExchangeOutcome::from_result(result, CHAT_FALLBACK)
    }

    pub async fn analyze(self, snapshot: &ResultsSnapshot) -> ExchangeOutcome {
        let result = self.client.try_analyze(snapshot).await;
        ExchangeOutcome::from_result(result, ANALYSIS_FALLBACK)
    }
}

/// The preamble followed by `window` mapped onto provider roles.
pub fn chat_messages(window: &[Turn]) -> Vec<ChatMessage> {
    std::iter::once(ChatMessage::user(CHAT_PREAMBLE))
        .chain(window.iter().map(|turn| match turn.speaker {
            Speaker::User => ChatMessage::user(turn.text.clone()),
            Speaker::Assistant => ChatMessage::assistant(turn.text.clone()),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Role;

    #[test]
    fn gate_is_released_when_guard_drops() {
        let gate = ProcessingGate::new();
        {
            let _guard = gate.try_acquire().unwrap();
            assert!(gate.is_busy());
            assert!(gate.try_acquire().is_none());
        }
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    struct Silent;

    #[async_trait::async_trait]
    impl GenerationProvider for Silent {
        fn name(&self) -> &str {
            "silent"
        }

        fn model_name(&self) -> &str {
            "silent-model"
        }

        async fn generate(
            &self,
            _messages: &[ChatMessage],
            _params: &GenerationParams,
        ) -> Result<String, LlmError> {
            Ok(String::new())
        }
    }

    #[test]
    fn begin_holds_the_flag_until_dropped() {
        let client = ExchangeClient::new(Arc::new(Silent));
        let held = client.begin().unwrap();
        assert!(client.is_processing());
        assert!(matches!(client.begin(), Err(LlmError::Busy)));
        drop(held);
        assert!(!client.is_processing());
        assert!(client.begin().is_ok());
    }

    #[test]
    fn chat_messages_prepend_preamble() {
        let window = vec![
            Turn::new(0, Speaker::Assistant, "Hello!"),
            Turn::new(1, Speaker::User, "I can't sleep"),
        ];
        let messages = chat_messages(&window);
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::User);
        assert!(messages[0].content.starts_with("You are MindBloom AI"));
        assert_eq!(messages[1], ChatMessage::assistant("Hello!"));
        assert_eq!(messages[2], ChatMessage::user("I can't sleep"));
    }

    #[test]
    fn fallback_outcome_keeps_cause() {
        let outcome = ExchangeOutcome::from_result(
            Err(LlmError::EmptyResponse {
                provider: "mock".to_string(),
            }),
            CHAT_FALLBACK,
        );
        assert!(outcome.is_fallback());
        assert_eq!(outcome.text(), CHAT_FALLBACK);
        assert!(matches!(outcome.error(), Some(LlmError::EmptyResponse { .. })));

        let ok = ExchangeOutcome::from_result(Ok("hi".to_string()), CHAT_FALLBACK);
        assert!(!ok.is_fallback());
        assert_eq!(ok.into_text(), "hi");
    }
}
