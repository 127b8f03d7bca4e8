//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod provider_generation_adapter;
mod smtp_mail_adapter;

pub use provider_generation_adapter::ProviderGenerationAdapter;
pub use smtp_mail_adapter::SmtpMailAdapter;
