//! Conversation session: the ordered turns of one chat.

mod chat;

pub use chat::{ChatSession, SendOutcome};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Existing turns sent alongside the newest one in each exchange.
pub const CONTEXT_WINDOW: usize = 10;

/// First assistant turn of every session.
pub const GREETING: &str =
    "Hello! I'm your mental wellness assistant. How can I support you today?";

/// Conversation starters offered before the user types anything.
pub const SUGGESTED_PROMPTS: [&str; 6] = [
    "What are some quick ways to reduce anxiety?",
    "How can I improve my focus throughout the day?",
    "What are signs I should talk to a professional?",
    "Can you suggest a 5-minute mindfulness exercise?",
    "How can I improve my sleep quality?",
    "What are good strategies for managing stress?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One message in a conversation. Turns are never edited once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: usize,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(id: usize, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}

/// Append-only list of turns. Only the exchange window is bounded; the
/// full history stays available for display.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    turns: Vec<Turn>,
    next_id: usize,
}

impl ConversationSession {
    /// A session holding only the greeting.
    pub fn new() -> Self {
        let mut session = Self {
            turns: Vec::new(),
            next_id: 0,
        };
        session.push(Speaker::Assistant, GREETING);
        session
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Append a turn and return it.
    pub fn push(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let turn = Turn::new(self.next_id, speaker, text);
        self.next_id += 1;
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    /// The most recent `CONTEXT_WINDOW` turns before the newest one, plus
    /// the newest one, oldest first. Call after appending the outgoing turn.
    pub fn window_for_exchange(&self) -> &[Turn] {
        let start = self.turns.len().saturating_sub(CONTEXT_WINDOW + 1);
        &self.turns[start..]
    }

    /// Replace the history with a fresh greeting.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.push(Speaker::Assistant, GREETING);
        tracing::debug!("conversation reset");
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}
