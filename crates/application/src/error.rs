//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Request failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No provider API key is configured
    #[error("Provider credential is not configured")]
    CredentialMissing,

    /// Every attempt against the provider timed out
    #[error("Provider timed out after {attempts} attempt(s)")]
    ProviderTimeout { attempts: u32 },

    /// Provider rejected the request or returned an unusable reply
    #[error("Provider error{}: {message}", .status_code.map(|c| format!(" (status {c})")).unwrap_or_default())]
    Provider {
        status_code: Option<u16>,
        message: String,
    },

    /// Network failure reaching the provider after retries
    #[error("Transport error: {0}")]
    Transport(String),

    /// SMTP credentials are absent
    #[error("Email service not configured")]
    MailNotConfigured,

    /// SMTP conversation failed
    #[error("Failed to send email: {0}")]
    MailDelivery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Create a provider error
    pub fn provider(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self::Provider {
            status_code,
            message: message.into(),
        }
    }
}
