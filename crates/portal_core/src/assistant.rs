//! Canned chat assistant. No inference, no network.

use chrono::Utc;
use shared::domain::{ChatMessage, MessageId};
use tracing::debug;

pub const GREETING: &str = "Hi! I'm Charter AI, your compliance assistant. I can help you understand controls, suggest missing evidence, or simulate compliance risks. How can I help you today?";

pub fn canned_reply(input: &str) -> String {
    format!(
        "I understand you're asking about {input}. Let me help you with that. Based on your current compliance status, I recommend focusing on SOC 2 CC1.1 controls first."
    )
}

#[derive(Debug, Clone)]
pub struct Assistant {
    open: bool,
    next_id: i64,
    messages: Vec<ChatMessage>,
}

impl Default for Assistant {
    fn default() -> Self {
        let mut assistant = Self {
            open: false,
            next_id: 1,
            messages: Vec::new(),
        };
        assistant.push(GREETING.to_string(), false);
        assistant
    }
}

impl Assistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Appends the user's message and the canned reply. Blank input appends nothing.
    pub fn send(&mut self, input: &str) -> Option<&[ChatMessage]> {
        if input.trim().is_empty() {
            return None;
        }
        let start = self.messages.len();
        self.push(input.to_string(), true);
        self.push(canned_reply(input), false);
        debug!(total = self.messages.len(), "assistant exchange appended");
        Some(&self.messages[start..])
    }

    fn push(&mut self, content: String, is_user: bool) {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            content,
            is_user,
            timestamp: Utc::now(),
        });
    }
}
