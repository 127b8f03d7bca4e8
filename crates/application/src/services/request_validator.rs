//! Request validator
//!
//! Turns an untyped JSON body into a [`GenerationRequest`]. Shape checks
//! (object, string types, tone membership) happen here; length bounds are
//! enforced by the domain constructor.

use domain::{DomainError, GenerationRequest, Tone};
use serde_json::{Map, Value};

/// Validates raw generation requests
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator;

impl RequestValidator {
    /// Validate a raw request body
    ///
    /// Fields are checked in the order `context`, `tone`, `recipient_name`,
    /// `additional_details`; the first violation is reported. Unknown
    /// fields are ignored.
    pub fn validate(input: &Value) -> Result<GenerationRequest, DomainError> {
        let Some(fields) = input.as_object() else {
            return Err(DomainError::invalid("body", "must be a JSON object"));
        };

        let context = match fields.get("context") {
            None | Some(Value::Null) => {
                return Err(DomainError::invalid("context", "field is required"));
            },
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(DomainError::invalid("context", "must be a string")),
        };

        let tone = match fields.get("tone") {
            None | Some(Value::Null) => Tone::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(_) => return Err(DomainError::invalid("tone", "must be a string")),
        };

        let recipient_name = optional_string(fields, "recipient_name")?;
        let additional_details = optional_string(fields, "additional_details")?;

        GenerationRequest::new(context, tone, recipient_name, additional_details)
    }
}

fn optional_string(fields: &Map<String, Value>, name: &str) -> Result<Option<String>, DomainError> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(DomainError::invalid(name, "must be a string")),
    }
}
