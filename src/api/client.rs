use crate::api::response::extract_content;
use crate::api::{ChatMessage, RequestBody};
use crate::config::Config;
use crate::error::{ChatError, Result};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tokio::time::{timeout, Duration};

/// Client for the chat-completions API. One instance per process; every
/// request goes through the same deadline and error mapping.
pub struct LlmClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    request_timeout: u64,
}

impl LlmClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|e| ChatError::Other(format!("Invalid authorization header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint.clone(),
            model: config.model.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Send one chat-completions request and return the assistant text.
    pub async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String> {
        let request_body = RequestBody {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens,
        };

        let deadline = Duration::from_secs(self.request_timeout);
        let response = timeout(
            deadline,
            self.client.post(&self.endpoint).json(&request_body).send(),
        )
        .await
        .map_err(|_| ChatError::Timeout)??;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::ApiError { status, message });
        }

        let response_json: Value = response.json().await?;
        match extract_content(&response_json)? {
            Some(content) => Ok(content.trim().to_string()),
            None => Err(ChatError::Other(
                "No content in assistant message".to_string(),
            )),
        }
    }
}
