//! Entities - request and response shapes of the drafting pipeline

mod compiled_prompt;
mod email_draft;
mod generation_request;
mod outgoing_email;

pub use compiled_prompt::CompiledPrompt;
pub use email_draft::{ADVISORY_SUGGESTIONS, EmailDraftResponse, ParsedDraft};
pub use generation_request::{
    CONTEXT_MAX_CHARS, CONTEXT_MIN_CHARS, DETAILS_MAX_CHARS, GenerationRequest,
    RECIPIENT_MAX_CHARS,
};
pub use outgoing_email::{DEFAULT_SENDER_NAME, OutgoingEmail};
