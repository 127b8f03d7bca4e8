//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the chat-completion
//! provider behind bounded retry, and the SMTP relay. Also owns
//! configuration loading and logging setup.

pub mod adapters;
pub mod config;
pub mod retry;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ENV_PREFIX, Environment, ServerConfig};
pub use retry::{MAX_RETRIES_CEILING, RetryConfig, RetryResult, Retryable, with_retry};
pub use telemetry::{DEFAULT_LOG_FILTER, TelemetryError, init_logging};
