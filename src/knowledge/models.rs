//! Data models for resolved topic content.

use serde::{Deserialize, Serialize};

/// A titled link into one of the wiki search indexes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedResource {
    pub title: String,
    pub url: String,
}

impl LinkedResource {
    pub fn new(title: String, url: String) -> Self {
        Self { title, url }
    }
}

/// Everything the resolver could gather about a topic.
///
/// Fields are independently absent or empty; a failed source leaves its
/// field blank instead of poisoning the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOverview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub books: Vec<LinkedResource>,
    #[serde(default)]
    pub facts: Vec<String>,
    #[serde(default)]
    pub courses: Vec<LinkedResource>,
}

impl TopicOverview {
    /// True when no source produced anything
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.books.is_empty()
            && self.facts.is_empty()
            && self.courses.is_empty()
    }
}
