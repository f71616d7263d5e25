//! Data models for generated flashcards.

use serde::{Deserialize, Serialize};

/// A question/answer pair derived from topic text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

impl Flashcard {
    pub fn new(question: String, answer: String) -> Self {
        Self { question, answer }
    }
}
