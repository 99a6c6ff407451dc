mod api;
mod search;

use crate::cli::Args;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

pub use api::ApiConfig;
pub use search::SearchConfig;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub debug: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub request_timeout: u64,
    pub search_api_key: Option<String>,
    pub search_endpoint: String,
    pub search_max_results: u32,
    pub debug: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self, String> {
        let file_config = FileConfig::load().unwrap_or_default();

        // The LLM key is required and comes from the environment only
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| "OPENAI_API_KEY environment variable not set")?;

        // Search key is optional; without it search degrades gracefully
        let search_api_key = env::var("SERPER_API_KEY").ok();

        // API endpoint: CLI args > env var > config file > default
        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env::var("CHAT_API_ENDPOINT").ok())
            .or(file_config.api.endpoint.clone())
            .map(normalize_endpoint)
            .unwrap_or_else(|| "https://api.openai.com/v1/chat/completions".to_string());

        // Model: env var > config file > default
        let model = env::var("CHAT_MODEL")
            .ok()
            .or(file_config.model.default_model.clone())
            .unwrap_or_else(|| "gpt-4.1-mini".to_string());

        // Extra system prompt appended to the built-in one: env var > config file
        let system_prompt = env::var("CHAT_SYSTEM_PROMPT")
            .ok()
            .or(file_config.model.system_prompt.clone());

        let request_timeout = env::var("CHAT_REQUEST_TIMEOUT")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .or(file_config.api.request_timeout)
            .unwrap_or(30);

        let search_endpoint = env::var("CHAT_SEARCH_ENDPOINT")
            .ok()
            .or(file_config.search.endpoint.clone())
            .unwrap_or_else(|| "https://google.serper.dev/search".to_string());

        let search_max_results = env::var("CHAT_SEARCH_RESULTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .or(file_config.search.max_results)
            .unwrap_or(5);

        // Debug: CLI flag > env var > config file > default
        let debug = args.debug
            || env::var("CHAT_DEBUG")
                .ok()
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .or(file_config.session.debug)
                .unwrap_or(false);

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            system_prompt,
            request_timeout,
            search_api_key,
            search_endpoint,
            search_max_results,
            debug,
        })
    }

    pub fn get_current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

/// Accept a bare base URL, a `/v1` base, or a full chat-completions URL.
fn normalize_endpoint(endpoint: String) -> String {
    if endpoint.ends_with("/chat/completions") {
        endpoint
    } else if endpoint.ends_with("/v1") {
        format!("{}/chat/completions", endpoint)
    } else if endpoint.ends_with("/v1/") {
        format!("{}chat/completions", endpoint)
    } else {
        format!("{}/v1/chat/completions", endpoint.trim_end_matches('/'))
    }
}

impl FileConfig {
    pub fn load() -> Result<Self> {
        let config_paths = Self::get_config_paths();

        for path in config_paths {
            if path.exists() {
                let contents = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

                let config: FileConfig = serde_yaml::from_str(&contents).with_context(|| {
                    format!("Failed to parse YAML config file: {}", path.display())
                })?;

                return Ok(config);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory (local override)
        paths.push(PathBuf::from(".chat2web.yaml"));
        paths.push(PathBuf::from(".chat2web.yml"));

        // 2. User's config directory (global config)
        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("chat2web");
            paths.push(config_dir.join("chat2web.yaml"));
            paths.push(config_dir.join("chat2web.yml"));
        }

        paths
    }
}
