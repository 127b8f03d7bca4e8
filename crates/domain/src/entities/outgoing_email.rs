//! An email ready to be handed to a mail transport

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::EmailAddress;

/// Display name used when the caller does not provide one
pub const DEFAULT_SENDER_NAME: &str = "EmailCraft AI";

/// A finished email addressed to a single recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Recipient address
    pub recipient: EmailAddress,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
    /// Display name placed in the From header
    pub sender_name: String,
}

impl OutgoingEmail {
    /// Create an outgoing email, rejecting blank subject or body
    pub fn new(
        recipient: EmailAddress,
        subject: impl Into<String>,
        body: impl Into<String>,
        sender_name: Option<String>,
    ) -> Result<Self, DomainError> {
        let subject = subject.into();
        let body = body.into();

        if subject.trim().is_empty() {
            return Err(DomainError::invalid("subject", "must not be blank"));
        }
        if body.trim().is_empty() {
            return Err(DomainError::invalid("body", "must not be blank"));
        }

        let sender_name = sender_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SENDER_NAME.to_string());

        Ok(Self {
            recipient,
            subject,
            body,
            sender_name,
        })
    }
}
