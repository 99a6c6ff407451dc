use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "chat")]
#[command(about = "Chat assistant with LLM intent routing and web search", long_about = None)]
pub struct Args {
    #[arg(short = 'n', long = "new", help = "Start a new conversation")]
    pub new_conversation: bool,

    #[arg(
        short = 'c',
        long = "continue",
        help = "Continue previous conversation even if expired"
    )]
    pub force_continue: bool,

    #[arg(long = "clear", help = "Clear all conversation history")]
    pub clear_history: bool,

    #[arg(short = 's', long = "search", help = "Force a web search for this message")]
    pub force_search: bool,

    #[arg(long = "no-search", help = "Answer without searching the web")]
    pub no_search: bool,

    #[arg(
        short = 'd',
        long = "debug",
        help = "Show the intent decision trace and diagnostic output"
    )]
    pub debug: bool,

    #[arg(
        long = "api-endpoint",
        help = "Custom chat-completions URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(help = "Message to send to the assistant")]
    pub message: Vec<String>,
}
