//! Value Objects - Immutable, identity-less domain primitives

mod email_address;
mod tone;

pub use email_address::EmailAddress;
pub use tone::Tone;
