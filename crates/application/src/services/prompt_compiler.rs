//! Prompt compiler
//!
//! Renders a validated request into the system/user prompt pair.

use domain::{CompiledPrompt, GenerationRequest};

/// Role and style guidance sent with every request
pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert email writing assistant. Your task is to craft professional, \
clear, and effective emails based on the user's context and requirements.

Guidelines:
- Always maintain the requested tone
- Keep emails concise but complete
- Use proper email etiquette
- Include appropriate greetings and closings
- Be culturally sensitive and professional
- Avoid jargon unless specifically requested

Format your response as a complete email with greeting, body, and closing.";

/// Stateless prompt renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptCompiler;

impl PromptCompiler {
    /// Compile a request into a prompt pair
    pub fn compile(request: &GenerationRequest) -> CompiledPrompt {
        let tone = request.tone();

        let mut user_prompt = format!("Write a {tone} email");
        if let Some(recipient) = request.recipient_name() {
            user_prompt.push_str(&format!(" to {recipient}"));
        }
        user_prompt.push_str(" with the following context:\n\n");
        user_prompt.push_str(&format!("Context: {}", request.context()));
        if let Some(details) = request.additional_details() {
            user_prompt.push_str(&format!("\n\nAdditional details: {details}"));
        }
        user_prompt.push_str(&format!(
            "\n\nTone: {tone}\n\nWrite a complete, ready-to-send professional email."
        ));

        CompiledPrompt::new(SYSTEM_INSTRUCTIONS, user_prompt)
    }
}
