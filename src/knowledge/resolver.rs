//! Topic lookups against the wiki APIs.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use super::models::{LinkedResource, TopicOverview};
use super::wikidata;
use crate::config::MentorConfig;
use crate::http::{FetchError, HttpJsonClient, JsonClient, Result};

/// Text returned when a summary lookup succeeds but carries no extract
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary available.";

/// Resolves topic content from Wikipedia, Wikibooks, Wikidata, and
/// Wikiversity. Each lookup is independent; callers decide how much of a
/// partial result to show.
pub struct KnowledgeResolver {
    client: Arc<dyn JsonClient>,
    wikipedia_base_url: String,
    wikibooks_base_url: String,
    wikidata_base_url: String,
    wikiversity_base_url: String,
    max_fact_properties: usize,
}

impl KnowledgeResolver {
    /// Build a resolver with the default HTTP transport.
    pub fn new(config: &MentorConfig) -> Result<Self> {
        let client = HttpJsonClient::new(Duration::from_secs(config.request_timeout_secs))?;
        Ok(Self::with_client(config, Arc::new(client)))
    }

    /// Build a resolver over a caller-supplied transport.
    pub fn with_client(config: &MentorConfig, client: Arc<dyn JsonClient>) -> Self {
        Self {
            client,
            wikipedia_base_url: config.wikipedia_base_url.clone(),
            wikibooks_base_url: config.wikibooks_base_url.clone(),
            wikidata_base_url: config.wikidata_base_url.clone(),
            wikiversity_base_url: config.wikiversity_base_url.clone(),
            max_fact_properties: config.max_fact_properties,
        }
    }

    /// Fetch the topic summary.
    ///
    /// `Ok(None)` means the topic has no article. A present-but-empty
    /// extract yields [`NO_SUMMARY_PLACEHOLDER`].
    pub async fn fetch_summary(&self, topic: &str) -> Result<Option<String>> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.wikipedia_base_url,
            urlencoding::encode(topic)
        );
        let body = match self.client.get_json(&url).await {
            Ok(body) => body,
            Err(FetchError::NotFound) => return Ok(None),
            Err(err) => return Err(err),
        };
        let summary: SummaryResponse = serde_json::from_value(body)?;
        Ok(Some(extract_or_placeholder(summary)))
    }

    /// Search Wikibooks for textbooks about the topic.
    ///
    /// Zero hits is an empty list, not an error.
    pub async fn fetch_books(&self, topic: &str) -> Result<Vec<LinkedResource>> {
        self.search_wiki(&self.wikibooks_base_url, topic).await
    }

    /// Search Wikiversity for courseware about the topic.
    pub async fn fetch_courses(&self, topic: &str) -> Result<Vec<LinkedResource>> {
        self.search_wiki(&self.wikiversity_base_url, topic).await
    }

    /// Resolve up to `max_fact_properties` structured facts through the
    /// Wikidata entity chain. Zero entity matches is an empty list.
    pub async fn fetch_facts(&self, topic: &str) -> Result<Vec<String>> {
        wikidata::fetch_facts(
            self.client.as_ref(),
            &self.wikidata_base_url,
            topic,
            self.max_fact_properties,
        )
        .await
    }

    /// Run all four lookups, degrading each failure to an absent or empty
    /// field so the caller can always render partial results.
    pub async fn fetch_topic(&self, topic: &str) -> TopicOverview {
        let summary = self.fetch_summary(topic).await.unwrap_or_else(|err| {
            log::warn!("Summary lookup for '{}' failed: {}", topic, err);
            None
        });
        let books = self.fetch_books(topic).await.unwrap_or_else(|err| {
            log::warn!("Wikibooks search for '{}' failed: {}", topic, err);
            Vec::new()
        });
        let facts = self.fetch_facts(topic).await.unwrap_or_else(|err| {
            log::warn!("Fact resolution for '{}' failed: {}", topic, err);
            Vec::new()
        });
        let courses = self.fetch_courses(topic).await.unwrap_or_else(|err| {
            log::warn!("Wikiversity search for '{}' failed: {}", topic, err);
            Vec::new()
        });

        TopicOverview {
            summary,
            books,
            facts,
            courses,
        }
    }

    async fn search_wiki(&self, base_url: &str, topic: &str) -> Result<Vec<LinkedResource>> {
        let body = self.client.get_json(&search_url(base_url, topic)).await?;
        let response: SearchResponse = serde_json::from_value(body)?;
        let hits = response.query.map(|query| query.search).unwrap_or_default();
        Ok(hits
            .into_iter()
            .map(|hit| {
                let url = article_url(base_url, &hit.title);
                LinkedResource::new(hit.title, url)
            })
            .collect())
    }
}

fn search_url(base_url: &str, topic: &str) -> String {
    format!(
        "{}/w/api.php?action=query&list=search&srsearch={}&format=json",
        base_url,
        urlencoding::encode(topic)
    )
}

/// Canonical article URL for a search hit. Spaces become underscores;
/// nothing else is rewritten.
fn article_url(base_url: &str, title: &str) -> String {
    format!("{}/wiki/{}", base_url, title.replace(' ', "_"))
}

fn extract_or_placeholder(summary: SummaryResponse) -> String {
    match summary.extract {
        Some(extract) if !extract.trim().is_empty() => extract,
        _ => NO_SUMMARY_PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    extract: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}
