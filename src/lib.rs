//! WikiMentor core library.
//!
//! Aggregates educational content from the public wiki APIs and layers an
//! AI tutor and a flashcard generator on top:
//!
//! - [`knowledge::KnowledgeResolver`] fetches topic summaries, textbook and
//!   courseware links, and chained Wikidata facts
//! - [`tutor::TutorGateway`] produces plain-language explanations through a
//!   hosted chat-completions endpoint
//! - [`flashcards::FlashcardSynthesizer`] turns topic text into structured
//!   question/answer cards
//! - [`session::LearningSession`] holds one session's chat history and its
//!   active deck
//!
//! The UI layer, persistence, and response caching live outside this crate.

pub mod config;
pub mod flashcards;
pub mod http;
pub mod inference;
pub mod knowledge;
pub mod session;
pub mod tutor;

pub use config::{ConfigError, MentorConfig};
pub use flashcards::{Flashcard, FlashcardSynthesizer};
pub use http::{FetchError, HttpJsonClient, JsonClient};
pub use inference::{InferenceClient, InferenceError};
pub use knowledge::{KnowledgeResolver, LinkedResource, TopicOverview};
pub use session::{ChatTurn, LearningSession};
pub use tutor::TutorGateway;
