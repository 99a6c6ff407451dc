use chat2web::models::{Message, Session};
use chat2web::session::{
    trim_conversation_history, FilesystemSessionStore, SessionStore, MAX_CONVERSATION_PAIRS,
};
use chrono::Local;
use std::fs;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tempfile::TempDir;

// Tests that repoint HOME must not run concurrently
fn home_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn create_test_session(id: &str, age_minutes: i64) -> Session {
    Session {
        session_id: id.to_string(),
        last_updated: Local::now() - chrono::Duration::minutes(age_minutes),
        messages: vec![Message::user("test")],
    }
}

fn with_temp_home() -> (TempDir, MutexGuard<'static, ()>) {
    let guard = home_lock().lock().unwrap_or_else(|e| e.into_inner());
    let temp_dir = TempDir::new().unwrap();
    let cache_dir = temp_dir.path().join(".cache").join("chat2web");
    fs::create_dir_all(&cache_dir).unwrap();
    std::env::set_var("HOME", temp_dir.path().to_str().unwrap());
    (temp_dir, guard)
}

#[test]
fn test_save_and_find_recent_session() {
    let (_home, _guard) = with_temp_home();

    let store = FilesystemSessionStore::new();
    let session = create_test_session("test-123", 0);

    store.save_session(&session).unwrap();

    let found = store.find_recent_session(false).unwrap();
    assert_eq!(found.session_id, "test-123");
    assert_eq!(found.messages[0].content, "test");
}

#[test]
fn test_find_recent_session_expired() {
    let (_home, _guard) = with_temp_home();

    let store = FilesystemSessionStore::new();
    let session = create_test_session("expired-123", 60); // 60 minutes old

    store.save_session(&session).unwrap();

    let found = store.find_recent_session(false);
    assert!(found.is_none());
}

#[test]
fn test_include_expired_recovers_old_session() {
    let (_home, _guard) = with_temp_home();

    let store = FilesystemSessionStore::new();
    store
        .save_session(&create_test_session("old-conversation", 60))
        .unwrap();

    // An expired session stays on disk and is reachable when asked for
    let found = store.find_recent_session(true).unwrap();
    assert_eq!(found.session_id, "old-conversation");

    let found_again = store.find_recent_session(true).unwrap();
    assert_eq!(found_again.session_id, "old-conversation");
}

#[test]
fn test_expired_sessions_removed_on_discovery() {
    let (home, _guard) = with_temp_home();

    let store = FilesystemSessionStore::new();
    store.save_session(&create_test_session("stale-1", 90)).unwrap();
    store.save_session(&create_test_session("stale-2", 45)).unwrap();
    store.save_session(&create_test_session("fresh", 1)).unwrap();

    let found = store.find_recent_session(false).unwrap();
    assert_eq!(found.session_id, "fresh");

    // Every expired file is gone, not just the newest one checked
    let remaining = fs::read_dir(home.path().join(".cache").join("chat2web"))
        .unwrap()
        .filter_map(|e| e.ok())
        .count();
    assert_eq!(remaining, 1);
}

#[test]
fn test_clear_all_sessions() {
    let (_home, _guard) = with_temp_home();

    let store = FilesystemSessionStore::new();
    store.save_session(&create_test_session("session-1", 0)).unwrap();
    store.save_session(&create_test_session("session-2", 0)).unwrap();

    store.clear_all_sessions().unwrap();

    assert!(store.find_recent_session(true).is_none());
}

#[test]
fn test_trim_keeps_last_pairs_and_system() {
    let mut messages = vec![Message::system("prompt")];
    for i in 0..10 {
        messages.push(Message::user(format!("question {}", i)));
        messages.push(Message::assistant(format!("answer {}", i)));
    }

    trim_conversation_history(&mut messages);

    assert_eq!(messages.len(), 1 + MAX_CONVERSATION_PAIRS * 2);
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages.last().unwrap().content, "answer 9");
}

#[test]
fn test_trim_short_history_untouched() {
    let mut messages = vec![Message::user("hi"), Message::assistant("hello")];
    trim_conversation_history(&mut messages);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].content, "hi");
}
