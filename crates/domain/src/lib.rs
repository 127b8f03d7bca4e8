//! Domain layer for EmailCraft
//!
//! Contains the email drafting vocabulary: tones, validated generation
//! requests, parsed drafts and outgoing messages. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
