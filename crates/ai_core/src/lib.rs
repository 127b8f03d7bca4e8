//! AI Core - Chat-completion client
//!
//! Talks to a hosted language model through an OpenAI-compatible
//! chat-completions API. Each call is exactly one HTTP request; retry policy
//! belongs to the caller.

pub mod chat_completions;
pub mod config;
pub mod error;
pub mod ports;

pub use chat_completions::{ChatCompletionEngine, MAX_RESPONSE_BYTES};
pub use config::ProviderConfig;
pub use error::GenerationError;
pub use ports::{ChatCompletion, ChatMessage, ChatRequest, GenerationEngine};
