pub mod client;
pub mod models;
pub mod response;

pub use client::LlmClient;
pub use models::{ChatMessage, RequestBody};
