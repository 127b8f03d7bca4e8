//! SMTP integration
//!
//! Relays finished emails through a submission server (Gmail, Outlook,
//! a local relay). Plain text only; one recipient per message.

mod config;
mod error;
mod message;
mod smtp_client;
mod tls;

pub use config::{SmtpConfig, TlsConfig, TlsMode};
pub use error::SmtpError;
pub use message::{EmailComposition, build_message, generate_message_id};
pub use smtp_client::SmtpClient;
