//! Generated email draft and the response shape returned to callers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Tone;

/// Advisory strings attached to every generated draft, in display order
pub const ADVISORY_SUGGESTIONS: [&str; 3] = [
    "Review the email for tone and clarity",
    "Personalize with specific details if needed",
    "Proofread before sending",
];

/// Subject and body extracted from a model reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDraft {
    /// Subject line, either extracted or synthesized
    pub subject: String,
    /// Trimmed body text
    pub body: String,
}

impl ParsedDraft {
    /// Create a new parsed draft
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// The finished draft as returned by the generation endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraftResponse {
    /// Subject line
    pub subject: String,
    /// Body text
    pub body: String,
    /// Tone the draft was written in
    pub tone: Tone,
    /// Assembly time
    pub generated_at: DateTime<Utc>,
    /// Fixed advisory strings
    pub suggestions: Vec<String>,
}

impl EmailDraftResponse {
    /// Assemble a response stamped with the given time
    pub fn assemble(draft: ParsedDraft, tone: Tone, generated_at: DateTime<Utc>) -> Self {
        Self {
            subject: draft.subject,
            body: draft.body,
            tone,
            generated_at,
            suggestions: ADVISORY_SUGGESTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}
