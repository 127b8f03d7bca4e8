//! Validated email generation request

use serde::Serialize;

use crate::errors::DomainError;
use crate::value_objects::Tone;

/// Minimum context length in characters, measured after trimming
pub const CONTEXT_MIN_CHARS: usize = 10;
/// Maximum context length in characters, measured after trimming
pub const CONTEXT_MAX_CHARS: usize = 1000;
/// Maximum recipient name length in characters
pub const RECIPIENT_MAX_CHARS: usize = 100;
/// Maximum additional details length in characters
pub const DETAILS_MAX_CHARS: usize = 500;

/// A request to draft one email
///
/// Instances can only be obtained through [`GenerationRequest::new`], so a
/// value of this type always satisfies the field constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    context: String,
    tone: Tone,
    recipient_name: Option<String>,
    additional_details: Option<String>,
}

impl GenerationRequest {
    /// Build a request, enforcing length bounds on every field
    ///
    /// `context` is trimmed before measuring. Empty optional fields are
    /// normalized to `None`.
    pub fn new(
        context: &str,
        tone: Tone,
        recipient_name: Option<String>,
        additional_details: Option<String>,
    ) -> Result<Self, DomainError> {
        let context = context.trim();
        if context.is_empty() {
            return Err(DomainError::invalid("context", "must not be blank"));
        }

        let len = context.chars().count();
        if !(CONTEXT_MIN_CHARS..=CONTEXT_MAX_CHARS).contains(&len) {
            return Err(DomainError::invalid(
                "context",
                format!(
                    "must be between {CONTEXT_MIN_CHARS} and {CONTEXT_MAX_CHARS} characters, got {len}"
                ),
            ));
        }

        let recipient_name = bounded_optional("recipient_name", recipient_name, RECIPIENT_MAX_CHARS)?;
        let additional_details =
            bounded_optional("additional_details", additional_details, DETAILS_MAX_CHARS)?;

        Ok(Self {
            context: context.to_string(),
            tone,
            recipient_name,
            additional_details,
        })
    }

    /// Trimmed context text
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Requested tone
    pub const fn tone(&self) -> Tone {
        self.tone
    }

    /// Recipient name, if one was supplied
    pub fn recipient_name(&self) -> Option<&str> {
        self.recipient_name.as_deref()
    }

    /// Additional details, if any were supplied
    pub fn additional_details(&self) -> Option<&str> {
        self.additional_details.as_deref()
    }
}

fn bounded_optional(
    field: &str,
    value: Option<String>,
    max_chars: usize,
) -> Result<Option<String>, DomainError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    let len = value.chars().count();
    if len > max_chars {
        return Err(DomainError::invalid(
            field,
            format!("must be at most {max_chars} characters, got {len}"),
        ));
    }

    Ok(Some(value))
}
