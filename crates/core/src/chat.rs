use std::time::Duration;

use crate::actions::{self, ActionOutcome};
use crate::intent::{self, GREETING};
use crate::models::{ChatReply, Message, Sender};

/// Pause a front end shows before revealing a reply. Callers own the timer.
pub const THINKING_DELAY: Duration = Duration::from_millis(800);

/// History of one chat widget. Lives as long as the view that owns it.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Sender::Assistant, GREETING)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns `None` and leaves history untouched for blank input.
    pub fn submit(&mut self, text: &str) -> Option<ChatReply> {
        if intent::is_blank(text) {
            return None;
        }

        self.messages.push(Message::new(Sender::User, text));
        let reply = intent::respond(text);
        self.messages
            .push(Message::new(Sender::Assistant, reply.text.clone()));
        Some(reply)
    }

    pub fn apply_action(&mut self, action_id: &str) -> ActionOutcome {
        let outcome = actions::dispatch(action_id);
        if let ActionOutcome::Reply { text } = &outcome {
            self.messages
                .push(Message::new(Sender::Assistant, text.clone()));
        }
        outcome
    }
}
