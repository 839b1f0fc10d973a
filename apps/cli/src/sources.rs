//! HTTP clients for the dictionary and context-sentence sources.
//!
//! Every fetch degrades to an empty contribution on failure; a broken source
//! must never abort a lookup.

use reqwest::{Client, Url};
use serde_json::Value;

use lexicard_core::{normalize_sentence, strip_markup};

const DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const TATOEBA_URL: &str = "https://tatoeba.org/en/api_v0/search";
const QUOTABLE_URL: &str = "https://api.quotable.io/search/quotes";

async fn request_json(client: &Client, url: Url) -> reqwest::Result<Value> {
    client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
}

/// Raw dictionary payload for an expression, or `None` when the source
/// failed or returned no entries.
pub async fn fetch_dictionary(client: &Client, expression: &str) -> Option<Value> {
    let mut url = Url::parse(DICTIONARY_URL).ok()?;
    url.path_segments_mut().ok()?.push(expression);

    match request_json(client, url).await {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::warn!(expression, error = %err, "dictionary lookup failed");
            None
        }
    }
}

/// Pull string values of `field` out of a `{ "results": [...] }` response,
/// stripping inline markup and normalizing whitespace. Total over malformed
/// responses.
fn result_strings(payload: &Value, field: &str) -> Vec<String> {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get(field).and_then(Value::as_str))
                .map(|text| normalize_sentence(&strip_markup(text)))
                .filter(|text| !text.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

async fn fetch_sentence_source(
    client: &Client,
    source: &'static str,
    base: &str,
    query: &[(&str, &str)],
    field: &str,
) -> Vec<String> {
    let url = match Url::parse_with_params(base, query) {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };

    match request_json(client, url).await {
        Ok(payload) => result_strings(&payload, field),
        Err(err) => {
            tracing::warn!(source, error = %err, "context sentence fetch failed");
            Vec::new()
        }
    }
}

/// Example sentences from Tatoeba.
pub async fn fetch_tatoeba(client: &Client, expression: &str) -> Vec<String> {
    fetch_sentence_source(
        client,
        "tatoeba",
        TATOEBA_URL,
        &[("from", "eng"), ("query", expression), ("sort", "relevance")],
        "text",
    )
    .await
}

/// Quote sentences from Quotable.
pub async fn fetch_quotable(client: &Client, expression: &str) -> Vec<String> {
    fetch_sentence_source(
        client,
        "quotable",
        QUOTABLE_URL,
        &[("query", expression), ("limit", "30")],
        "content",
    )
    .await
}
