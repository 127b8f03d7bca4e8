//! Prompt pair sent to the language model

use serde::{Deserialize, Serialize};

/// System instructions plus user prompt for one generation call
///
/// A pure function of a [`crate::GenerationRequest`]; equal requests compile
/// to byte-identical prompts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompiledPrompt {
    /// Fixed role and style guidance
    pub system_instructions: String,
    /// Request-specific instruction text
    pub user_prompt: String,
}

impl CompiledPrompt {
    /// Create a new prompt pair
    pub fn new(system_instructions: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_instructions: system_instructions.into(),
            user_prompt: user_prompt.into(),
        }
    }
}
