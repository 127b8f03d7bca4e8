//! Response parser
//!
//! Extracts a subject line from free-text model output. The model is asked
//! for a complete email, not a structured reply, so the only signal is a
//! line beginning with `subject:` in any letter case.

use domain::ParsedDraft;

const SUBJECT_MARKER: &str = "subject:";
const FALLBACK_CONTEXT_CHARS: usize = 50;

/// Line-scanning subject extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser;

impl ResponseParser {
    /// Split a model reply into subject and body
    ///
    /// Only the first marker line is consumed. Without a marker the subject
    /// becomes `Re: ` plus the first 50 characters of `fallback_context` and a
    /// literal `...`, and the whole trimmed reply is the body.
    pub fn parse(reply: &str, fallback_context: &str) -> ParsedDraft {
        let lines: Vec<&str> = reply.trim().split('\n').collect();

        let marker = lines
            .iter()
            .position(|line| line.to_lowercase().starts_with(SUBJECT_MARKER));

        match marker {
            Some(idx) => {
                let subject = lines[idx]
                    .split_once(':')
                    .map_or("", |(_, rest)| rest)
                    .trim()
                    .to_string();
                let body = lines
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, line)| *line)
                    .collect::<Vec<_>>()
                    .join("\n");
                ParsedDraft::new(subject, body.trim())
            },
            None => ParsedDraft::new(fallback_subject(fallback_context), reply.trim()),
        }
    }
}

fn fallback_subject(context: &str) -> String {
    let head: String = context.chars().take(FALLBACK_CONTEXT_CHARS).collect();
    format!("Re: {head}...")
}
