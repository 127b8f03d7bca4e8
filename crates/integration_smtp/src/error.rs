//! SMTP errors

use thiserror::Error;

/// Errors raised while delivering a message
#[derive(Debug, Error)]
pub enum SmtpError {
    /// Username or password missing
    #[error("SMTP credentials not configured")]
    NotConfigured,

    /// TCP connection could not be opened
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// TLS setup or handshake failed
    #[error("TLS error: {0}")]
    Tls(String),

    /// Server rejected the credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Server replied with an unexpected status
    #[error("Unexpected reply to {command}: {reply}")]
    UnexpectedReply { command: String, reply: String },

    /// Reading from or writing to the socket failed
    #[error("I/O error: {0}")]
    Io(String),

    /// The whole conversation exceeded its deadline
    #[error("SMTP conversation timed out after {0}s")]
    Timeout(u64),
}
