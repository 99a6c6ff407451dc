use crate::config::Config;
use crate::error::{ChatError, Result};
use crate::models::SearchResult;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};

pub const SEARCH_TIMEOUT_SECS: u64 = 10;

/// Thin client for the Serper web search API.
pub struct SearchClient {
    client: reqwest::Client,
    endpoint: String,
    max_results: u32,
}

impl SearchClient {
    /// Returns None when no search key is configured; the caller treats
    /// that the same as a failed search.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        let api_key = match &config.search_api_key {
            Some(key) => key.clone(),
            None => return Ok(None),
        };

        let mut headers = HeaderMap::new();
        headers.insert(
            "X-API-KEY",
            HeaderValue::from_str(&api_key)
                .map_err(|e| ChatError::Other(format!("Invalid search API key: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Some(Self {
            client,
            endpoint: config.search_endpoint.clone(),
            max_results: config.search_max_results,
        }))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let payload = json!({
            "q": query,
            "num": self.max_results,
        });

        let deadline = Duration::from_secs(SEARCH_TIMEOUT_SECS);
        let response = timeout(
            deadline,
            self.client.post(&self.endpoint).json(&payload).send(),
        )
        .await
        .map_err(|_| ChatError::Timeout)??;

        if !response.status().is_success() {
            return Err(ChatError::SearchError(format!(
                "search request failed with status {}",
                response.status().as_u16()
            )));
        }

        let body: Value = response.json().await?;
        Ok(parse_results(&body, self.max_results as usize))
    }
}

/// Pull ranked results out of a Serper response body. The knowledge graph
/// description, when present, rides along as one extra entry.
pub fn parse_results(body: &Value, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    if let Some(organic) = body.get("organic").and_then(|o| o.as_array()) {
        for entry in organic.iter().take(max_results) {
            results.push(SearchResult {
                title: field_or(entry, "title", "No title"),
                snippet: field_or(entry, "snippet", "No description"),
                url: field_or(entry, "link", ""),
            });
        }
    }

    if let Some(kg) = body.get("knowledgeGraph") {
        if let Some(description) = kg.get("description").and_then(|d| d.as_str()) {
            results.push(SearchResult {
                title: field_or(kg, "title", "Knowledge Graph"),
                snippet: description.to_string(),
                url: field_or(kg, "link", ""),
            });
        }
    }

    results
}

/// Serialize results as JSON context for the summarization prompt.
pub fn results_as_context(results: &[SearchResult]) -> String {
    serde_json::to_string_pretty(results).unwrap_or_else(|_| "[]".to_string())
}

fn field_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or(default)
        .to_string()
}
