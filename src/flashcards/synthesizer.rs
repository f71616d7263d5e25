//! Flashcard synthesis and reply parsing.

use super::models::Flashcard;
use crate::config::MentorConfig;
use crate::inference::{InferenceClient, InferenceError};

/// Generates a flashcard set from a body of topic text.
pub struct FlashcardSynthesizer {
    inference: InferenceClient,
    max_source_text_length: usize,
}

impl FlashcardSynthesizer {
    pub fn new(config: &MentorConfig, inference: InferenceClient) -> Self {
        Self {
            inference,
            max_source_text_length: config.max_source_text_length,
        }
    }

    /// Request a card set for the given source text and parse the reply.
    ///
    /// An unparseable reply yields an empty set, not an error.
    pub async fn synthesize(&self, source_text: &str) -> Result<Vec<Flashcard>, InferenceError> {
        let prompt = build_prompt(source_text, self.max_source_text_length);
        let raw = self.inference.complete(&prompt).await?;
        Ok(parse_flashcards(&raw))
    }
}

/// Build the synthesis prompt, hard-truncating the source to
/// `max_source_chars` characters first. The cutoff ignores word boundaries.
fn build_prompt(source_text: &str, max_source_chars: usize) -> String {
    let text: String = source_text.chars().take(max_source_chars).collect();
    format!(
        "Create 5 flashcards based on this content:\n\n{}\n\nFormat:\nQ: ...\nA: ...",
        text
    )
}

/// Parse a model reply into cards.
///
/// The text before the first `Q:` marker is preamble and discarded. Each
/// remaining segment must contain exactly one `A:` marker; segments with
/// zero or several are dropped whole, as are segments with an empty
/// question. The answer keeps only its first line.
pub fn parse_flashcards(raw: &str) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    for block in raw.split("Q:").skip(1) {
        let parts: Vec<&str> = block.split("A:").collect();
        if parts.len() != 2 {
            continue;
        }
        let question = parts[0].trim();
        if question.is_empty() {
            continue;
        }
        let answer = parts[1].trim().lines().next().unwrap_or("");
        cards.push(Flashcard::new(question.to_string(), answer.to_string()));
    }
    cards
}
