//! In-memory session state: chat history and the active flashcard deck.
//!
//! Owned and serialized by the surrounding application layer; the core only
//! defines the shape and its two invariants. History is append-only, and
//! the deck holds the latest synthesized set only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flashcards::Flashcard;

/// One query/reply exchange with the tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub query: String,
    pub reply: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(query: String, reply: String) -> Self {
        Self {
            query,
            reply,
            timestamp: Utc::now(),
        }
    }
}

/// State held for the lifetime of one user session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSession {
    pub id: Uuid,
    history: Vec<ChatTurn>,
    deck: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LearningSession {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            history: Vec::new(),
            deck: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append one turn. Recorded turns are never mutated or removed.
    pub fn record_turn(&mut self, query: String, reply: String) {
        self.history.push(ChatTurn::new(query, reply));
        self.updated_at = Utc::now();
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Replace the deck with the latest synthesized set.
    pub fn replace_deck(&mut self, cards: Vec<Flashcard>) {
        self.deck = cards;
        self.updated_at = Utc::now();
    }

    pub fn deck(&self) -> &[Flashcard] {
        &self.deck
    }
}

impl Default for LearningSession {
    fn default() -> Self {
        Self::new()
    }
}
