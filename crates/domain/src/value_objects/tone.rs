//! Email tone value object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Writing style requested for a generated email
///
/// Closed set: unknown values are rejected rather than coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Businesslike and polished
    #[default]
    Professional,
    /// Warm and approachable
    Friendly,
    /// Ceremonious, suited to official correspondence
    Formal,
    /// Relaxed and conversational
    Casual,
}

impl Tone {
    /// All supported tones, in canonical order
    pub const ALL: [Self; 4] = [
        Self::Professional,
        Self::Friendly,
        Self::Formal,
        Self::Casual,
    ];

    /// Wire representation of the tone
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Friendly => "friendly",
            Self::Formal => "formal",
            Self::Casual => "casual",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = DomainError;

    /// Parses the exact lowercase wire value; `"Formal"` is rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid(
                    "tone",
                    format!(
                        "unsupported value '{s}', expected one of: professional, friendly, formal, casual"
                    ),
                )
            })
    }
}
