//! Text-generation collaborator: blocking client for an OpenAI-compatible
//! chat-completions endpoint

mod client;

pub use client::{LlmClient, LlmError, DEFAULT_MODEL};
