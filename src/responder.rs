use crate::api::{ChatMessage, LlmClient};
use crate::config::Config;
use crate::models::{Message, SearchResult, ROLE_SYSTEM, ROLE_USER};
use crate::search::results_as_context;
use colored::*;

const CHAT_SYSTEM_PROMPT: &str = "You are a helpful chatbot that can search the web for information. When users ask questions that don't require current information, provide friendly, helpful responses. Keep responses concise and engaging. If appropriate, suggest they can ask you to search for specific information.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are a helpful AI assistant that summarizes search results. Given a user query and search results, provide a concise, informative summary that directly answers the user's question. Focus on extracting the most relevant information from the search results. Your summary should be 2-3 paragraphs at most, highlighting the key points and insights.";

pub const APOLOGY: &str =
    "I'm having trouble connecting to my AI services. Please try again in a moment.";

pub const SUMMARY_FAILED: &str =
    "I found some search results but couldn't generate a summary. Please see the sources below.";

pub const SEARCH_UNAVAILABLE_NOTE: &str =
    "Web search was unavailable, so this answer may not reflect current information.";

/// What the responder has to work with after routing.
pub enum SearchContext<'a> {
    /// The router decided no search was needed.
    NotNeeded,
    /// A search was needed but failed or was not configured.
    Unavailable,
    Results(&'a [SearchResult]),
}

/// Produce the final assistant text. One model call, no retries; every
/// failure maps to a canned line rather than an error.
pub async fn generate(
    client: &LlmClient,
    config: &Config,
    history: &[Message],
    message: &str,
    search: SearchContext<'_>,
) -> String {
    match search {
        SearchContext::Results(results) => summarize(client, config, message, results).await,
        SearchContext::NotNeeded => converse(client, config, history, message).await,
        SearchContext::Unavailable => {
            let answer = converse(client, config, history, message).await;
            format!("{}\n\n{}", SEARCH_UNAVAILABLE_NOTE, answer)
        }
    }
}

async fn converse(
    client: &LlmClient,
    config: &Config,
    history: &[Message],
    message: &str,
) -> String {
    let date_line = format!("Today's date is {}.", Config::get_current_date());
    let system_content = match &config.system_prompt {
        Some(extra) => format!("{}\n\n{}\n\n{}", date_line, CHAT_SYSTEM_PROMPT, extra),
        None => format!("{}\n\n{}", date_line, CHAT_SYSTEM_PROMPT),
    };

    let mut request = vec![ChatMessage::new(ROLE_SYSTEM, system_content)];
    request.extend(
        history
            .iter()
            .filter(|m| m.role != ROLE_SYSTEM)
            .map(ChatMessage::from),
    );
    request.push(ChatMessage::new(ROLE_USER, message));

    match client.chat(request, 0.3, 400).await {
        Ok(answer) => answer,
        Err(e) => {
            if config.debug {
                eprintln!(
                    "{}",
                    format!("[chat] Response generation failed: {}", e).dimmed()
                );
            }
            APOLOGY.to_string()
        }
    }
}

async fn summarize(
    client: &LlmClient,
    config: &Config,
    message: &str,
    results: &[SearchResult],
) -> String {
    let request = vec![
        ChatMessage::new(ROLE_SYSTEM, SUMMARY_SYSTEM_PROMPT),
        ChatMessage::new(
            ROLE_USER,
            format!(
                "Query: {}\n\nSearch Results: {}\n\nPlease provide a concise summary of these search results that answers my query.",
                message,
                results_as_context(results)
            ),
        ),
    ];

    match client.chat(request, 0.3, 300).await {
        Ok(summary) => summary,
        Err(e) => {
            if config.debug {
                eprintln!(
                    "{}",
                    format!("[chat] Summarization failed: {}", e).dimmed()
                );
            }
            SUMMARY_FAILED.to_string()
        }
    }
}
