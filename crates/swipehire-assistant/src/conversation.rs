//! Conversation history and per-turn upsert state

use serde::{Deserialize, Serialize};

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation, in the gateway's wire shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Whether the current turn has shown any assistant text yet.
///
/// The first fragment of a turn appends a new assistant message; every later
/// fragment replaces it. Modeling this explicitly avoids inferring it from
/// the role of the last history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnState {
    AwaitingFirstFragment,
    Streaming,
}

/// Conversation history with upsert-last-assistant-message semantics
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    turn: Option<TurnState>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full history, in the order it was said
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Record the user's question and open a new turn
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role: Role::User,
            content: content.into(),
        });
        self.turn = Some(TurnState::AwaitingFirstFragment);
    }

    /// Apply a recomputed visible-text update for the open turn
    pub fn apply_update(&mut self, text: &str) {
        match self.turn {
            Some(TurnState::AwaitingFirstFragment) => {
                self.messages.push(ChatMessage {
                    role: Role::Assistant,
                    content: text.to_string(),
                });
                self.turn = Some(TurnState::Streaming);
            }
            Some(TurnState::Streaming) => {
                if let Some(last) = self.messages.last_mut() {
                    last.content = text.to_string();
                }
            }
            None => {}
        }
    }

    /// Close the turn with the final visible text
    pub fn finish_turn(&mut self, text: &str) {
        if !text.is_empty() {
            self.apply_update(text);
        }
        self.turn = None;
    }

    /// Drop any partial assistant message so the question can be retried
    pub fn abort_turn(&mut self) {
        if self.turn == Some(TurnState::Streaming) {
            self.messages.pop();
        }
        self.turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_update_appends_assistant_message() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.apply_update("He");
        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[1].role, Role::Assistant);
        assert_eq!(c.messages()[1].content, "He");
    }

    #[test]
    fn test_later_updates_replace_not_append() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.apply_update("He");
        c.apply_update("Hello");
        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[1].content, "Hello");
    }

    #[test]
    fn test_update_without_open_turn_is_ignored() {
        let mut c = Conversation::new();
        c.apply_update("stray");
        assert!(c.is_empty());
    }

    #[test]
    fn test_finish_records_final_text() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.finish_turn("Hello there");
        assert_eq!(c.messages().len(), 2);
        assert_eq!(c.messages()[1].content, "Hello there");

        // next turn appends again
        c.push_user("more");
        c.apply_update("Sure");
        assert_eq!(c.messages().len(), 4);
    }

    #[test]
    fn test_finish_with_empty_text_adds_nothing() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.finish_turn("");
        assert_eq!(c.messages().len(), 1);
    }

    #[test]
    fn test_abort_drops_partial_assistant_message() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.apply_update("par");
        c.abort_turn();
        assert_eq!(c.messages().len(), 1);
        assert_eq!(c.messages()[0].role, Role::User);
    }

    #[test]
    fn test_abort_before_first_fragment_keeps_question() {
        let mut c = Conversation::new();
        c.push_user("hi");
        c.abort_turn();
        assert_eq!(c.messages().len(), 1);
    }
}
