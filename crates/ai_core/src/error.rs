//! Generation errors

use thiserror::Error;

/// Errors from a single chat-completion attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No API key configured; raised before any request is sent
    #[error("Missing provider credential")]
    MissingCredential,

    /// The attempt exceeded its timeout
    #[error("Generation timeout after {0}ms")]
    Timeout(u64),

    /// Provider answered with a non-success status
    #[error("Provider returned status {status}: {message}")]
    Provider { status: u16, message: String },

    /// Connection could not be established or was interrupted
    #[error("Transport error: {0}")]
    Transport(String),

    /// Success status but the payload did not contain a completion
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GenerationError {
    /// Classify a reqwest failure for an attempt with the given timeout
    pub fn from_reqwest(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Whether another attempt might succeed
    ///
    /// Timeouts, transport failures and 5xx statuses are transient. 4xx
    /// statuses, malformed payloads and a missing key are not.
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Transport(_) => true,
            Self::Provider { status, .. } => *status >= 500,
            Self::MissingCredential | Self::InvalidResponse(_) => false,
        }
    }
}
