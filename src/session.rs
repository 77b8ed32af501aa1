//! Session state and conversation history
//!
//! `SessionState` is fixed when the chatbot is built. `Conversation` is a
//! value: adding a turn returns a new conversation and leaves the old one as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intent::Category;

/// The source snippet a conversation is about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: Uuid,
    code: String,
    /// Whether the snippet came from a file upload rather than typed input
    code_uploaded: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionState {
    pub fn new(code: impl Into<String>, code_uploaded: bool) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            code: code.into(),
            code_uploaded,
            created_at: Utc::now(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn code_uploaded(&self) -> bool {
        self.code_uploaded
    }
}

/// One completed question/answer exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub question: String,
    pub answer: String,
    pub category: Option<Category>,
    pub asked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// New conversation with `turn` appended
    pub fn with_turn(&self, turn: Turn) -> Self {
        let mut turns = Vec::with_capacity(self.turns.len() + 1);
        turns.extend(self.turns.iter().cloned());
        turns.push(turn);
        Self { turns }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(question: &str) -> Turn {
        Turn {
            question: question.to_string(),
            answer: "ok".to_string(),
            category: None,
            asked_at: Utc::now(),
        }
    }

    #[test]
    fn test_with_turn_leaves_original_untouched() {
        let empty = Conversation::new();
        let one = empty.with_turn(turn("first"));
        let two = one.with_turn(turn("second"));

        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(two.len(), 2);
        assert_eq!(two.turns()[0].question, "first");
        assert_eq!(two.last().map(|t| t.question.as_str()), Some("second"));
    }

    #[test]
    fn test_session_state() {
        let session = SessionState::new("class A {}", true);
        assert_eq!(session.code(), "class A {}");
        assert!(session.code_uploaded());
        assert_ne!(session.session_id, SessionState::new("", false).session_id);
    }
}
