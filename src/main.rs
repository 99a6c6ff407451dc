use clap::Parser;
use colored::*;
use std::process;

use chat2web::api::LlmClient;
use chat2web::cli::Args;
use chat2web::config::Config;
use chat2web::intent;
use chat2web::models::{IntentDecision, Message};
use chat2web::responder::{self, SearchContext};
use chat2web::search::SearchClient;
use chat2web::session::{
    clear_all_sessions, create_new_session, find_recent_session, save_session,
    trim_conversation_history,
};
use chat2web::ui;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Handle --clear option
    if args.clear_history {
        match clear_all_sessions() {
            Ok(_) => {
                println!("{}", "All conversation history cleared.".green());
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", format!("Error clearing history: {}", e).red());
                process::exit(1);
            }
        }
    }

    if args.message.is_empty() {
        print_usage();
        process::exit(1);
    }

    let message = args.message.join(" ");

    // Load configuration
    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let llm = match LlmClient::from_config(&config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    // Load or create session; --continue reaches past the expiry window
    let mut session = if args.new_conversation {
        create_new_session()
    } else {
        find_recent_session(args.force_continue).unwrap_or_else(create_new_session)
    };

    let mut history = session.messages.clone();
    trim_conversation_history(&mut history);

    if config.debug {
        eprintln!("{}", format!("[chat] Using model: {}", config.model).dimmed());
        eprintln!(
            "{}",
            format!("[chat] History: {} messages", history.len()).dimmed()
        );
    }

    // Resolve the intent decision; force flags bypass the router entirely
    let decision = if args.force_search {
        IntentDecision::search(message.clone(), "Forced by --search")
    } else if args.no_search {
        IntentDecision::conversational("Disabled by --no-search")
    } else {
        intent::route(&llm, &history, &message, config.debug).await
    };

    if config.debug {
        ui::display_intent_trace(&decision);
    }

    // Execute the search when the decision calls for one
    let mut search_results = None;
    let search_context = if decision.needs_search {
        let query = decision
            .search_query
            .clone()
            .unwrap_or_else(|| message.clone());

        match SearchClient::from_config(&config) {
            Ok(Some(search)) => match search.search(&query).await {
                Ok(results) if !results.is_empty() => {
                    if config.debug {
                        eprintln!(
                            "{}",
                            format!("[chat] Search returned {} results", results.len()).dimmed()
                        );
                    }
                    search_results = Some(results);
                    SearchContext::Results(search_results.as_deref().unwrap_or(&[]))
                }
                Ok(_) => {
                    if config.debug {
                        eprintln!("{}", "[chat] Search returned no results".dimmed());
                    }
                    SearchContext::Unavailable
                }
                Err(e) => {
                    if config.debug {
                        eprintln!("{}", format!("[chat] Search failed: {}", e).dimmed());
                    }
                    SearchContext::Unavailable
                }
            },
            Ok(None) => {
                if config.debug {
                    eprintln!(
                        "{}",
                        "[chat] SERPER_API_KEY not set, skipping search".dimmed()
                    );
                }
                SearchContext::Unavailable
            }
            Err(e) => {
                if config.debug {
                    eprintln!("{}", format!("[chat] Search client error: {}", e).dimmed());
                }
                SearchContext::Unavailable
            }
        }
    } else {
        SearchContext::NotNeeded
    };

    let answer = responder::generate(&llm, &config, &history, &message, search_context).await;

    ui::display_answer(&answer);
    if let Some(results) = &search_results {
        ui::display_sources(results);
    }

    // Save session with both turns appended
    session.messages = history;
    session.messages.push(Message::user(message));
    session.messages.push(Message::assistant(answer));
    session.last_updated = chrono::Local::now();

    if let Err(e) = save_session(&session) {
        if config.debug {
            eprintln!(
                "{}",
                format!("[chat] Warning: Failed to save session: {}", e).dimmed()
            );
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("{}", "Usage: chat [OPTIONS] <message>".red());
    eprintln!("{}", "  -s, --search      Force a web search".dimmed());
    eprintln!("{}", "      --no-search   Answer without searching".dimmed());
    eprintln!("{}", "  -n, --new         Start a new conversation".dimmed());
    eprintln!(
        "{}",
        "  -c, --continue    Continue previous conversation even if expired".dimmed()
    );
    eprintln!("{}", "      --clear       Clear all conversation history".dimmed());
    eprintln!(
        "{}",
        "  -d, --debug       Show the intent decision trace".dimmed()
    );
}
