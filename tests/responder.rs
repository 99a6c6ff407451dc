use chat2web::api::LlmClient;
use chat2web::config::Config;
use chat2web::models::{Message, SearchResult};
use chat2web::responder::{
    generate, SearchContext, APOLOGY, SEARCH_UNAVAILABLE_NOTE, SUMMARY_FAILED,
};

fn offline_config() -> Config {
    Config {
        api_key: "test-key".to_string(),
        // Nothing listens here, so every call fails fast
        api_endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
        model: "gpt-4.1-mini".to_string(),
        system_prompt: None,
        request_timeout: 2,
        search_api_key: None,
        search_endpoint: "http://127.0.0.1:9/search".to_string(),
        search_max_results: 5,
        debug: false,
    }
}

#[tokio::test]
async fn test_generate_apologizes_on_llm_failure() {
    let config = offline_config();
    let client = LlmClient::from_config(&config).unwrap();

    let answer = generate(
        &client,
        &config,
        &[],
        "Hello, how are you?",
        SearchContext::NotNeeded,
    )
    .await;

    assert_eq!(answer, APOLOGY);
}

#[tokio::test]
async fn test_generate_notes_unavailable_search() {
    let config = offline_config();
    let client = LlmClient::from_config(&config).unwrap();

    let history = vec![
        Message::user("hi"),
        Message::assistant("Hello! How can I help?"),
    ];
    let answer = generate(
        &client,
        &config,
        &history,
        "What's the weather like today?",
        SearchContext::Unavailable,
    )
    .await;

    assert!(answer.starts_with(SEARCH_UNAVAILABLE_NOTE));
    // The direct answer still degrades to the apology offline
    assert!(answer.ends_with(APOLOGY));
}

#[tokio::test]
async fn test_generate_reports_failed_summary() {
    let config = offline_config();
    let client = LlmClient::from_config(&config).unwrap();

    let results = vec![SearchResult {
        title: "Forecast".to_string(),
        snippet: "Sunny with light wind.".to_string(),
        url: "https://example.com/weather".to_string(),
    }];
    let answer = generate(
        &client,
        &config,
        &[],
        "What's the weather like today?",
        SearchContext::Results(&results),
    )
    .await;

    assert_eq!(answer, SUMMARY_FAILED);
}
