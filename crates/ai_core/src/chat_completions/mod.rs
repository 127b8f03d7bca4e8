//! OpenAI-compatible chat-completions engine
//!
//! Works against any provider exposing `POST {base_url}/chat/completions`
//! with bearer authentication (OpenRouter, OpenAI, local gateways).

mod api_error;
mod client;

pub use client::{ChatCompletionEngine, MAX_RESPONSE_BYTES};
