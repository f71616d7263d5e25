//! Knowledge resolution against the public wiki APIs.
//!
//! This module provides:
//! - Topic summaries from the Wikipedia REST endpoint
//! - Textbook and courseware links from the Wikibooks / Wikiversity search APIs
//! - Structured facts from Wikidata, resolved through a chained entity lookup
//! - An aggregate lookup that degrades per source, so one unavailable
//!   upstream never hides the others

pub mod models;
pub mod resolver;
mod wikidata;

pub use models::{LinkedResource, TopicOverview};
pub use resolver::{KnowledgeResolver, NO_SUMMARY_PLACEHOLDER};
