mod filesystem;
mod storage;

pub use filesystem::FilesystemSessionStore;
pub use storage::SessionStore;

use crate::models::{Message, Session, ROLE_SYSTEM};
use chrono::Local;
use uuid::Uuid;

pub const MAX_CONVERSATION_PAIRS: usize = 3; // Keep last 3 exchanges (6 messages)

/// Trim conversation history to keep only the last N exchanges
pub fn trim_conversation_history(messages: &mut Vec<Message>) {
    // Keep system messages (if any) + last N conversation pairs
    let mut system_messages: Vec<Message> = messages
        .iter()
        .filter(|m| m.role == ROLE_SYSTEM)
        .cloned()
        .collect();

    let conversation_messages: Vec<Message> = messages
        .iter()
        .filter(|m| m.role != ROLE_SYSTEM)
        .cloned()
        .collect();

    let keep_count = MAX_CONVERSATION_PAIRS * 2; // Each pair has user + assistant
    let trimmed: Vec<Message> = conversation_messages
        .into_iter()
        .rev()
        .take(keep_count)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    messages.clear();
    messages.append(&mut system_messages);
    messages.extend(trimmed);
}

/// Create a new session
pub fn create_new_session() -> Session {
    Session {
        session_id: Uuid::new_v4().to_string(),
        last_updated: Local::now(),
        messages: vec![],
    }
}

/// Convenience functions that use the default filesystem store
pub fn find_recent_session(include_expired: bool) -> Option<Session> {
    FilesystemSessionStore::new().find_recent_session(include_expired)
}

pub fn save_session(session: &Session) -> crate::error::Result<()> {
    FilesystemSessionStore::new().save_session(session)
}

pub fn clear_all_sessions() -> crate::error::Result<()> {
    FilesystemSessionStore::new().clear_all_sessions()
}
