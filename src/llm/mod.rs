//! Summarization backend: DashScope's OpenAI-compatible chat completions API.

pub mod client;
mod types;

pub use client::{DashScopeClient, LlmError, Summarizer};
