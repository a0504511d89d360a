//! Chat-completion client for OpenRouter-compatible endpoints.

mod client;

pub use client::{ChatClient, ChatMessage, DEFAULT_MODEL};
