//! Flashcard generation from topic text.
//!
//! The synthesizer asks the inference endpoint for a fixed-format card set
//! and parses the free-text reply into question/answer pairs. Malformed
//! blocks are dropped, never partially parsed.

pub mod models;
pub mod synthesizer;

pub use models::Flashcard;
pub use synthesizer::{parse_flashcards, FlashcardSynthesizer};
