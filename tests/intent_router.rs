use chat2web::api::LlmClient;
use chat2web::cli::Args;
use chat2web::config::Config;
use chat2web::intent::{fallback_decision, parse_decision, route};
use chat2web::models::Message;

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

#[test]
fn test_fallback_weather_today_needs_search() {
    let decision = fallback_decision("What's the weather like today?");
    assert!(decision.needs_search);
    let query = decision.search_query.unwrap();
    assert!(query.contains("weather"));
}

#[test]
fn test_fallback_greeting_is_conversational() {
    let decision = fallback_decision("Hello, how are you?");
    assert!(!decision.needs_search);
    assert!(decision.search_query.is_none());
}

#[test]
fn test_fallback_arithmetic_is_conversational() {
    let decision = fallback_decision("What's 2+2?");
    assert!(!decision.needs_search);
}

#[test]
fn test_fallback_trigger_keywords_need_search() {
    for message in [
        "latest news about AI",
        "current price of gold",
        "breaking developments in fusion",
        "what is trending on social media",
    ] {
        let decision = fallback_decision(message);
        assert!(decision.needs_search, "expected search for: {}", message);
        assert_eq!(decision.search_query.as_deref(), Some(message));
    }
}

#[test]
fn test_fallback_date_reference_needs_search() {
    let decision = fallback_decision("Who won the world cup in 2022?");
    assert!(decision.needs_search);

    let decision = fallback_decision("What happened in October in Berlin?");
    assert!(decision.needs_search);
}

#[test]
fn test_fallback_triggers_match_whole_words_only() {
    assert!(!fallback_decision("The package was delivered").needs_search);
    assert!(!fallback_decision("Sign me up for the newsletter").needs_search);
    assert!(fallback_decision("Any news on the merger?").needs_search);
}

#[test]
fn test_fallback_always_has_rationale() {
    assert!(fallback_decision("latest scores").rationale.is_some());
    assert!(fallback_decision("write me a poem").rationale.is_some());
}

#[test]
fn test_parse_decision_plain_json() {
    let decision = parse_decision(
        r#"{"needs_search": true, "search_query": "current weather", "rationale": "asks for fresh data"}"#,
    )
    .unwrap();
    assert!(decision.needs_search);
    assert_eq!(decision.search_query.as_deref(), Some("current weather"));
    assert_eq!(decision.rationale.as_deref(), Some("asks for fresh data"));
}

#[test]
fn test_parse_decision_accepts_reasoning_alias() {
    let decision = parse_decision(
        r#"{"needs_search": false, "search_query": null, "reasoning": "smalltalk"}"#,
    )
    .unwrap();
    assert!(!decision.needs_search);
    assert_eq!(decision.rationale.as_deref(), Some("smalltalk"));
}

#[test]
fn test_parse_decision_code_fenced_json() {
    let raw = "```json\n{\"needs_search\": true, \"search_query\": \"ai news\"}\n```";
    let decision = parse_decision(raw).unwrap();
    assert!(decision.needs_search);
    assert_eq!(decision.search_query.as_deref(), Some("ai news"));
}

#[test]
fn test_parse_decision_json_embedded_in_prose() {
    let raw = "Here is my decision: {\"needs_search\": false} Hope that helps!";
    let decision = parse_decision(raw).unwrap();
    assert!(!decision.needs_search);
}

#[test]
fn test_parse_decision_garbage_is_none() {
    assert!(parse_decision("I cannot answer that").is_none());
    assert!(parse_decision("").is_none());
    assert!(parse_decision("}{").is_none());
}

#[tokio::test]
async fn test_route_survives_llm_failure_with_trigger() {
    let config = offline_config();
    let client = LlmClient::from_config(&config).unwrap();

    let decision = route(&client, &[], "What's the weather like today?", false).await;
    assert!(decision.needs_search);
    assert!(decision.search_query.unwrap().contains("weather"));
}

#[tokio::test]
async fn test_route_survives_llm_failure_without_trigger() {
    let config = offline_config();
    let client = LlmClient::from_config(&config).unwrap();

    let history = vec![
        Message::user("hi there"),
        Message::assistant("Hello! How can I help?"),
    ];
    let decision = route(&client, &history, "What's 2+2?", false).await;
    assert!(!decision.needs_search);
}

#[test]
fn test_default_args_do_not_force_search() {
    let args = Args::default();
    assert!(!args.force_search);
    assert!(!args.no_search);
}
