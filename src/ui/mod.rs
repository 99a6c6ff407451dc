mod output;

pub use output::{display_answer, display_intent_trace, display_sources};
