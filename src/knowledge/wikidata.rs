//! Wikidata fact resolution.
//!
//! A fact is one of the first-ranked entity's claims rendered as
//! `"<property label>: <value label>"`. Resolving the set takes a chain of
//! lookups: entity search, the entity document, then one label lookup for
//! the property and one for the claim's target entity. Properties resolve
//! best effort; a failed hop skips that property and never aborts its
//! siblings.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::http::{FetchError, JsonClient, Result};

/// Resolve up to `max_properties` facts for a topic.
///
/// Zero entity matches is an empty list, not an error. Claim properties are
/// taken in the order the entity document returns them.
pub(crate) async fn fetch_facts(
    client: &dyn JsonClient,
    base_url: &str,
    topic: &str,
    max_properties: usize,
) -> Result<Vec<String>> {
    let entity_id = match search_first_entity(client, base_url, topic).await? {
        Some(id) => id,
        None => return Ok(Vec::new()),
    };
    let entity = fetch_entity(client, base_url, &entity_id).await?;

    let mut facts = Vec::new();
    for (property_id, statements) in entity.claims.iter().take(max_properties) {
        match resolve_fact(client, base_url, property_id, statements).await {
            Ok(Some(fact)) => facts.push(fact),
            Ok(None) => log::debug!("Skipping {}: no resolvable entity value", property_id),
            Err(err) => log::debug!("Skipping {}: {}", property_id, err),
        }
    }
    Ok(facts)
}

/// Resolve one claim to a fact string, or `None` when any hop comes up
/// empty (literal value, missing snak, missing English label).
async fn resolve_fact(
    client: &dyn JsonClient,
    base_url: &str,
    property_id: &str,
    statements: &[Statement],
) -> Result<Option<String>> {
    let property_label = match fetch_label(client, base_url, property_id).await? {
        Some(label) => label,
        None => return Ok(None),
    };
    let target_id = match first_entity_target(statements) {
        Some(id) => id,
        None => return Ok(None),
    };
    let value_label = match fetch_label(client, base_url, &target_id).await? {
        Some(label) => label,
        None => return Ok(None),
    };
    Ok(Some(format!("{}: {}", property_label, value_label)))
}

async fn search_first_entity(
    client: &dyn JsonClient,
    base_url: &str,
    topic: &str,
) -> Result<Option<String>> {
    let url = format!(
        "{}/w/api.php?action=wbsearchentities&search={}&language=en&format=json",
        base_url,
        urlencoding::encode(topic)
    );
    let body = client.get_json(&url).await?;
    let response: EntitySearchResponse = serde_json::from_value(body)?;
    Ok(response.search.into_iter().next().map(|hit| hit.id))
}

async fn fetch_entity(client: &dyn JsonClient, base_url: &str, id: &str) -> Result<EntityRecord> {
    let body = client.get_json(&entity_data_url(base_url, id)).await?;
    let mut response: EntityDataResponse = serde_json::from_value(body)?;
    response
        .entities
        .remove(id)
        .ok_or_else(|| FetchError::Malformed(format!("entity document missing record for {}", id)))
}

/// English label of an entity or property, when it has one.
async fn fetch_label(client: &dyn JsonClient, base_url: &str, id: &str) -> Result<Option<String>> {
    let entity = fetch_entity(client, base_url, id).await?;
    Ok(entity.labels.get("en").map(|label| label.value.clone()))
}

fn entity_data_url(base_url: &str, id: &str) -> String {
    format!("{}/wiki/Special:EntityData/{}.json", base_url, id)
}

/// The first statement's main value, when it points at another entity.
/// Literal values (strings, quantities, dates) have no id and yield `None`.
fn first_entity_target(statements: &[Statement]) -> Option<String> {
    statements
        .first()?
        .mainsnak
        .as_ref()?
        .datavalue
        .as_ref()?
        .value
        .as_ref()?
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[derive(Debug, Deserialize)]
struct EntitySearchResponse {
    #[serde(default)]
    search: Vec<EntitySearchHit>,
}

#[derive(Debug, Deserialize)]
struct EntitySearchHit {
    id: String,
}

#[derive(Debug, Deserialize)]
struct EntityDataResponse {
    entities: HashMap<String, EntityRecord>,
}

#[derive(Debug, Deserialize)]
struct EntityRecord {
    #[serde(default)]
    labels: HashMap<String, LabelRecord>,
    /// Claim map; property order is the upstream's and must stay that way
    #[serde(default)]
    claims: IndexMap<String, Vec<Statement>>,
}

#[derive(Debug, Deserialize)]
struct LabelRecord {
    value: String,
}

#[derive(Debug, Deserialize)]
struct Statement {
    mainsnak: Option<Snak>,
}

#[derive(Debug, Deserialize)]
struct Snak {
    datavalue: Option<DataValue>,
}

#[derive(Debug, Deserialize)]
struct DataValue {
    value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::http::testing::CannedClient;

    const BASE: &str = "https://wikidata.test";

    fn search_url(topic: &str) -> String {
        format!(
            "{}/w/api.php?action=wbsearchentities&search={}&language=en&format=json",
            BASE,
            urlencoding::encode(topic)
        )
    }

    fn entity_url(id: &str) -> String {
        format!("{}/wiki/Special:EntityData/{}.json", BASE, id)
    }

    fn label_doc(id: &str, label: &str) -> Value {
        json!({"entities": {id: {"labels": {"en": {"value": label}}}}})
    }

    fn entity_claim(target: &str) -> Value {
        json!([{"mainsnak": {"datavalue": {"value": {"id": target}}}}])
    }

    #[test]
    fn test_first_entity_target_entity_reference() {
        let statements: Vec<Statement> = serde_json::from_value(entity_claim("Q42")).unwrap();
        assert_eq!(first_entity_target(&statements).as_deref(), Some("Q42"));
    }

    #[test]
    fn test_first_entity_target_literal_value() {
        let statements: Vec<Statement> =
            serde_json::from_value(json!([{"mainsnak": {"datavalue": {"value": "1879-03-14"}}}]))
                .unwrap();
        assert!(first_entity_target(&statements).is_none());
    }

    #[test]
    fn test_first_entity_target_missing_snak() {
        let statements: Vec<Statement> = serde_json::from_value(json!([{}])).unwrap();
        assert!(first_entity_target(&statements).is_none());
        assert!(first_entity_target(&[]).is_none());
    }

    #[test]
    fn test_claim_order_survives_the_value_roundtrip() {
        // Keys deliberately not in alphabetical order; the document order
        // must survive deserialization through serde_json::Value.
        let raw = r#"{"labels": {}, "claims": {"P31": [], "P17": [], "P2936": [], "P6": []}}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        let record: EntityRecord = serde_json::from_value(value).unwrap();

        let keys: Vec<&String> = record.claims.keys().collect();
        assert_eq!(keys, ["P31", "P17", "P2936", "P6"]);
    }

    #[tokio::test]
    async fn test_fetch_facts_zero_matches_is_empty() {
        let client = CannedClient::new().with_response(
            &search_url("xyzzzyqqq123"),
            json!({"search": []}),
        );

        let facts = fetch_facts(&client, BASE, "xyzzzyqqq123", 5).await.unwrap();
        assert!(facts.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_facts_resolves_and_preserves_claim_order() {
        let client = CannedClient::new()
            .with_response(&search_url("Berlin"), json!({"search": [{"id": "Q64"}]}))
            .with_response(
                &entity_url("Q64"),
                json!({"entities": {"Q64": {"claims": {
                    "P31": entity_claim("Q515"),
                    // Literal-valued claim: property label resolves, value does not
                    "P1082": [{"mainsnak": {"datavalue": {"value": "3755251"}}}],
                    // Label document missing upstream for this property
                    "P9999": entity_claim("Q183"),
                    "P17": entity_claim("Q183")
                }}}}),
            )
            .with_response(&entity_url("P31"), label_doc("P31", "instance of"))
            .with_response(&entity_url("Q515"), label_doc("Q515", "city"))
            .with_response(&entity_url("P1082"), label_doc("P1082", "population"))
            .with_response(&entity_url("P17"), label_doc("P17", "country"))
            .with_response(&entity_url("Q183"), label_doc("Q183", "Germany"));

        let facts = fetch_facts(&client, BASE, "Berlin", 5).await.unwrap();
        assert_eq!(facts, ["instance of: city", "country: Germany"]);
    }

    #[tokio::test]
    async fn test_fetch_facts_caps_at_max_properties() {
        let client = CannedClient::new()
            .with_response(&search_url("Berlin"), json!({"search": [{"id": "Q64"}]}))
            .with_response(
                &entity_url("Q64"),
                json!({"entities": {"Q64": {"claims": {
                    "P31": entity_claim("Q515"),
                    "P17": entity_claim("Q183"),
                    "P6": entity_claim("Q1")
                }}}}),
            )
            .with_response(&entity_url("P31"), label_doc("P31", "instance of"))
            .with_response(&entity_url("Q515"), label_doc("Q515", "city"))
            .with_response(&entity_url("P17"), label_doc("P17", "country"))
            .with_response(&entity_url("Q183"), label_doc("Q183", "Germany"));

        let facts = fetch_facts(&client, BASE, "Berlin", 2).await.unwrap();
        assert_eq!(facts, ["instance of: city", "country: Germany"]);

        // The capped-off property was never looked up
        assert!(!client.calls().contains(&entity_url("P6")));
    }

    #[tokio::test]
    async fn test_fetch_facts_takes_first_ranked_entity() {
        let client = CannedClient::new()
            .with_response(
                &search_url("Mercury"),
                json!({"search": [{"id": "Q308"}, {"id": "Q925"}]}),
            )
            .with_response(
                &entity_url("Q308"),
                json!({"entities": {"Q308": {"claims": {"P31": entity_claim("Q634")}}}}),
            )
            .with_response(&entity_url("P31"), label_doc("P31", "instance of"))
            .with_response(&entity_url("Q634"), label_doc("Q634", "planet"));

        let facts = fetch_facts(&client, BASE, "Mercury", 5).await.unwrap();
        assert_eq!(facts, ["instance of: planet"]);
        assert!(!client.calls().contains(&entity_url("Q925")));
    }

    #[tokio::test]
    async fn test_fetch_facts_missing_english_label_skips_property() {
        let client = CannedClient::new()
            .with_response(&search_url("Berlin"), json!({"search": [{"id": "Q64"}]}))
            .with_response(
                &entity_url("Q64"),
                json!({"entities": {"Q64": {"claims": {
                    "P31": entity_claim("Q515"),
                    "P17": entity_claim("Q183")
                }}}}),
            )
            // P31 has only a German label; the property is skipped
            .with_response(
                &entity_url("P31"),
                json!({"entities": {"P31": {"labels": {"de": {"value": "ist ein(e)"}}}}}),
            )
            .with_response(&entity_url("P17"), label_doc("P17", "country"))
            .with_response(&entity_url("Q183"), label_doc("Q183", "Germany"));

        let facts = fetch_facts(&client, BASE, "Berlin", 5).await.unwrap();
        assert_eq!(facts, ["country: Germany"]);
    }

    #[tokio::test]
    async fn test_fetch_facts_is_idempotent() {
        let client = Arc::new(
            CannedClient::new()
                .with_response(&search_url("Berlin"), json!({"search": [{"id": "Q64"}]}))
                .with_response(
                    &entity_url("Q64"),
                    json!({"entities": {"Q64": {"claims": {"P31": entity_claim("Q515")}}}}),
                )
                .with_response(&entity_url("P31"), label_doc("P31", "instance of"))
                .with_response(&entity_url("Q515"), label_doc("Q515", "city")),
        );

        let first = fetch_facts(client.as_ref(), BASE, "Berlin", 5).await.unwrap();
        let second = fetch_facts(client.as_ref(), BASE, "Berlin", 5).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first, ["instance of: city"]);
    }

    #[tokio::test]
    async fn test_fetch_facts_search_failure_is_error_kind() {
        let client = CannedClient::new().with_upstream_failure(&search_url("Berlin"), 500);

        let result = fetch_facts(&client, BASE, "Berlin", 5).await;
        assert!(matches!(result, Err(FetchError::Upstream(500))));
    }
}
