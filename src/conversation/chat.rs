use std::sync::Arc;

use crate::app::{Notice, NoticeQueue};
use crate::conversation::{ConversationSession, Speaker};
use crate::llm::{ExchangeClient, ExchangeOutcome};

/// What [`ChatSession::send`] did with the input.
#[derive(Debug)]
pub enum SendOutcome {
    /// Blank input; nothing was appended.
    Ignored,
    /// An exchange is already in flight; nothing was appended.
    Busy,
    /// The user turn and the assistant reply (possibly the fallback) were
    /// appended.
    Replied(ExchangeOutcome),
}

/// A conversation wired to an exchange client.
pub struct ChatSession {
    conversation: ConversationSession,
    client: Arc<ExchangeClient>,
}

impl ChatSession {
    pub fn new(client: Arc<ExchangeClient>) -> Self {
        Self {
            conversation: ConversationSession::new(),
            client,
        }
    }

    pub fn conversation(&self) -> &ConversationSession {
        &self.conversation
    }

    /// Append the user's message, exchange the window, and append the reply.
    ///
    /// A fallback reply also raises [`Notice::exchange_failed`].
    pub async fn send(&mut self, input: &str, notices: &mut NoticeQueue) -> SendOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SendOutcome::Ignored;
        }
        let exchange = match self.client.begin() {
            Ok(exchange) => exchange,
            Err(e) => {
                tracing::debug!("Chat exchange not started: {}", e);
                return SendOutcome::Busy;
            }
        };

        self.conversation.push(Speaker::User, text);
        let outcome = exchange
            .chat(self.conversation.window_for_exchange())
            .await;

        notices.report_fallback(&outcome, Notice::exchange_failed);
        self.conversation.push(Speaker::Assistant, outcome.text());
        SendOutcome::Replied(outcome)
    }

    /// Start over with only the greeting.
    pub fn reset(&mut self) {
        self.conversation.reset();
    }
}
