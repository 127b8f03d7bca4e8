//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A request field violated its constraints
    #[error("Invalid {field}: {reason}")]
    InvalidRequest { field: String, reason: String },

    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),
}

impl DomainError {
    /// Create an invalid-request error scoped to a single field
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if the error is field-scoped
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidRequest { field, .. } => Some(field),
            Self::InvalidEmailAddress(_) => None,
        }
    }
}
