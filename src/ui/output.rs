use crate::models::{IntentDecision, SearchResult};
use colored::*;

/// Print the assistant's answer.
pub fn display_answer(answer: &str) {
    println!("{}", answer.trim_end());
}

/// Print the sources behind a searched answer.
pub fn display_sources(results: &[SearchResult]) {
    if results.is_empty() {
        return;
    }

    println!("{}", "\n---\nSources:".dimmed());
    for (index, result) in results.iter().enumerate() {
        println!("{}", format!("[{}] {}", index + 1, result.title).cyan());
        if !result.url.is_empty() {
            println!("{}", format!("    {}", result.url).dimmed());
        }
    }
}

/// Print the intent trace on stderr (debug mode only).
pub fn display_intent_trace(decision: &IntentDecision) {
    eprintln!(
        "{}",
        format!(
            "[chat] Intent: {}",
            if decision.needs_search {
                "search"
            } else {
                "conversational"
            }
        )
        .dimmed()
    );
    if let Some(query) = &decision.search_query {
        eprintln!("{}", format!("[chat] Search query: {}", query).dimmed());
    }
    if let Some(rationale) = &decision.rationale {
        eprintln!("{}", format!("[chat] Rationale: {}", rationale).dimmed());
    }
}
