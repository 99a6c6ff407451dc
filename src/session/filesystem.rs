use super::storage::SessionStore;
use crate::error::{ChatError, Result};
use crate::models::Session;
use chrono::{DateTime, Local};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const SESSION_EXPIRY_MINUTES: i64 = 30;

/// Session store backed by JSON files under `~/.cache/chat2web`.
pub struct FilesystemSessionStore;

impl FilesystemSessionStore {
    pub fn new() -> Self {
        Self
    }

    fn cache_dir(&self) -> Result<PathBuf> {
        let home = env::var("HOME")
            .map_err(|_| ChatError::SessionError("HOME environment variable not set".into()))?;
        let cache_dir = Path::new(&home).join(".cache").join("chat2web");
        if !cache_dir.exists() {
            fs::create_dir_all(&cache_dir)?;
        }
        Ok(cache_dir)
    }

    /// All stored sessions, newest first.
    fn load_sessions(&self) -> Vec<(PathBuf, Session)> {
        let cache_dir = match self.cache_dir() {
            Ok(dir) => dir,
            Err(_) => return Vec::new(),
        };

        let entries = match fs::read_dir(&cache_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut sessions: Vec<(PathBuf, Session)> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension()? == "json"
                    && path.file_name()?.to_str()?.starts_with("session-")
                {
                    let content = fs::read_to_string(&path).ok()?;
                    let session: Session = serde_json::from_str(&content).ok()?;
                    Some((path, session))
                } else {
                    None
                }
            })
            .collect();

        sessions.sort_by(|a, b| b.1.last_updated.cmp(&a.1.last_updated));
        sessions
    }

    fn is_expired(session: &Session, now: DateTime<Local>) -> bool {
        let age_minutes = now
            .signed_duration_since(session.last_updated)
            .num_minutes();
        age_minutes.abs() >= SESSION_EXPIRY_MINUTES
    }
}

impl SessionStore for FilesystemSessionStore {
    fn find_recent_session(&self, include_expired: bool) -> Option<Session> {
        let sessions = self.load_sessions();

        if include_expired {
            // Picking a conversation back up: age does not matter, and
            // nothing gets deleted out from under the caller
            return sessions.into_iter().next().map(|(_, session)| session);
        }

        let now = Local::now();
        let mut found = None;
        for (path, session) in sessions {
            if Self::is_expired(&session, now) {
                // Expired files are removed as soon as they are seen
                let _ = fs::remove_file(&path);
            } else if found.is_none() {
                found = Some(session);
            }
        }

        found
    }

    fn save_session(&self, session: &Session) -> Result<()> {
        let cache_dir = self.cache_dir()?;
        let session_file = cache_dir.join(format!("session-{}.json", session.session_id));
        let content = serde_json::to_string_pretty(session)?;
        fs::write(session_file, content)?;
        Ok(())
    }

    fn clear_all_sessions(&self) -> Result<()> {
        let cache_dir = self.cache_dir()?;
        if let Ok(entries) = fs::read_dir(&cache_dir) {
            for entry in entries.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension() == Some(std::ffi::OsStr::new("json"))
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with("session-"))
                {
                    fs::remove_file(path)?;
                }
            }
        }
        Ok(())
    }
}

impl Default for FilesystemSessionStore {
    fn default() -> Self {
        Self::new()
    }
}
