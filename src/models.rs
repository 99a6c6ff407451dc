use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const ROLE_SYSTEM: &str = "system";
pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One turn of the conversation. Immutable once created; the timestamp is
/// session metadata and is not part of the wire format sent to the model.
#[derive(Serialize, Deserialize, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            timestamp: Local::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ROLE_ASSISTANT, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ROLE_SYSTEM, content)
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub struct Session {
    pub session_id: String,
    pub last_updated: DateTime<Local>,
    pub messages: Vec<Message>,
}

/// Outcome of routing one user message. Derived per message, never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct IntentDecision {
    #[serde(default)]
    pub needs_search: bool,
    #[serde(default)]
    pub search_query: Option<String>,
    #[serde(default, alias = "reasoning")]
    pub rationale: Option<String>,
}

impl IntentDecision {
    pub fn conversational(rationale: impl Into<String>) -> Self {
        Self {
            needs_search: false,
            search_query: None,
            rationale: Some(rationale.into()),
        }
    }

    pub fn search(query: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            needs_search: true,
            search_query: Some(query.into()),
            rationale: Some(rationale.into()),
        }
    }
}

/// A single ranked web search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub snippet: String,
    pub url: String,
}
