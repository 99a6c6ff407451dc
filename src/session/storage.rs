use crate::error::Result;
use crate::models::Session;

/// Storage backend for conversation sessions.
pub trait SessionStore: Send + Sync {
    /// Find the most recent session. With `include_expired` the expiry
    /// window is ignored, so an old conversation can be picked back up;
    /// otherwise expired sessions are cleaned up and skipped.
    fn find_recent_session(&self, include_expired: bool) -> Option<Session>;

    /// Persist a session
    fn save_session(&self, session: &Session) -> Result<()>;

    /// Remove all stored sessions
    fn clear_all_sessions(&self) -> Result<()>;
}
