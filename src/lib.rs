pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod intent;
pub mod models;
pub mod responder;
pub mod search;
pub mod session;
pub mod ui;
