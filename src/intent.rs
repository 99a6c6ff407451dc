use crate::api::{ChatMessage, LlmClient};
use crate::models::{IntentDecision, Message, ROLE_SYSTEM, ROLE_USER};
use colored::*;
use regex::Regex;

const INTENT_SYSTEM_PROMPT: &str = r#"You are an intent detection system for a chatbot that can search the web.

Analyze the user's message and determine:
1. Whether they need current information, facts, or data that would require a web search
2. What the optimal search query should be

Return a JSON response with:
- "needs_search": boolean (true if web search is needed)
- "search_query": string (the optimized search query, or null if no search needed)
- "rationale": string (brief explanation of your decision)

Examples:
- "What time/date is it?" -> needs_search: true, search_query: "current datetime"
- "What's the weather like?" -> needs_search: true, search_query: "current weather"
- "Hello, how are you?" -> needs_search: false, search_query: null
- "What's 2+2?" -> needs_search: false, search_query: null
- "Latest news about AI" -> needs_search: true, search_query: "latest AI news"
- "How to make coffee" -> needs_search: true, search_query: "how to make coffee step by step"

Focus on detecting when users need current, factual, or specific information that would benefit from a web search. Respond with the JSON object only."#;

/// Terms that mark a message as needing fresh information when the model
/// is unavailable. Matched as whole words in the lowercased message.
pub const SEARCH_TRIGGER_KEYWORDS: &[&str] = &[
    "latest",
    "recent",
    "current",
    "today",
    "yesterday",
    "tonight",
    "news",
    "update",
    "price",
    "stock",
    "weather",
    "forecast",
    "score",
    "released",
    "announced",
    "trending",
    "happening",
    "right now",
    "breaking",
    "this week",
    "this month",
    "real-time",
    "live",
    "outage",
];

/// Classify one user message. The model decides on the primary path; any
/// failure there degrades to the keyword heuristic, so this never errors.
pub async fn route(
    client: &LlmClient,
    history: &[Message],
    message: &str,
    debug: bool,
) -> IntentDecision {
    let mut request = vec![ChatMessage::new(ROLE_SYSTEM, INTENT_SYSTEM_PROMPT)];
    request.extend(
        history
            .iter()
            .filter(|m| m.role != ROLE_SYSTEM)
            .map(ChatMessage::from),
    );
    request.push(ChatMessage::new(ROLE_USER, message));

    match client.chat(request, 0.0, 500).await {
        Ok(raw) => match parse_decision(&raw) {
            Some(decision) => decision,
            None => {
                if debug {
                    eprintln!(
                        "{}",
                        format!("[chat] Unparsable intent reply, using fallback: {}", raw)
                            .dimmed()
                    );
                }
                fallback_decision(message)
            }
        },
        Err(e) => {
            if debug {
                eprintln!(
                    "{}",
                    format!("[chat] Intent call failed, using fallback: {}", e).dimmed()
                );
            }
            fallback_decision(message)
        }
    }
}

/// Parse the model's decision JSON, tolerating code fences and prose around
/// the object.
pub fn parse_decision(raw: &str) -> Option<IntentDecision> {
    if let Ok(decision) = serde_json::from_str::<IntentDecision>(raw.trim()) {
        return Some(decision);
    }

    // Models wrap JSON in fences or lead-in text often enough to matter
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

/// Keyword heuristic used when the model path is unavailable. The raw
/// message doubles as the search query.
pub fn fallback_decision(message: &str) -> IntentDecision {
    let lower = message.to_lowercase();

    if let Some(keyword) = find_trigger_keyword(&lower) {
        return IntentDecision::search(
            message,
            format!("Fallback heuristic: message mentions \"{}\"", keyword),
        );
    }

    if let Some(reference) = find_date_reference(&lower) {
        return IntentDecision::search(
            message,
            format!("Fallback heuristic: message references \"{}\"", reference),
        );
    }

    IntentDecision::conversational("Fallback heuristic: no search trigger terms found")
}

// Whole-word matching keeps "live" out of "delivered" and "news" out of
// "newsletter"
fn find_trigger_keyword(lower: &str) -> Option<&'static str> {
    let pattern = format!(r"\b({})\b", SEARCH_TRIGGER_KEYWORDS.join("|"));
    let re = Regex::new(&pattern).ok()?;
    let matched = re.find(lower)?;
    SEARCH_TRIGGER_KEYWORDS
        .iter()
        .find(|&&keyword| keyword == matched.as_str())
        .copied()
}

fn find_date_reference(lower: &str) -> Option<String> {
    let re = Regex::new(
        // "may" is left out: the modal verb swamps the month
        r"\b((19|20)\d{2}|january|february|march|april|june|july|august|september|october|november|december)\b",
    )
    .ok()?;
    re.find(lower).map(|m| m.as_str().to_string())
}
