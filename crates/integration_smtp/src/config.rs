//! SMTP relay configuration

use std::{fmt, path::PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How the connection is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Implicit TLS on port 465, STARTTLS on every other port
    #[default]
    Auto,
    /// Always upgrade with STARTTLS
    StartTls,
    /// TLS from the first byte
    Implicit,
    /// Plain TCP; only for local relays and tests
    None,
}

/// TLS settings for the relay connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Connection security mode
    #[serde(default)]
    pub mode: TlsMode,

    /// Whether to verify TLS certificates
    ///
    /// `None` is treated as `true`.
    #[serde(default)]
    pub verify_certificates: Option<bool>,

    /// Path to a custom CA certificate file (PEM format)
    #[serde(default)]
    pub ca_cert_path: Option<PathBuf>,

    /// Minimum TLS version to accept (default: "1.2")
    #[serde(default = "default_min_tls_version")]
    pub min_tls_version: String,
}

fn default_min_tls_version() -> String {
    "1.2".to_string()
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            mode: TlsMode::Auto,
            verify_certificates: None,
            ca_cert_path: None,
            min_tls_version: default_min_tls_version(),
        }
    }
}

impl TlsConfig {
    /// Check if TLS certificate verification is enabled
    #[must_use]
    pub fn should_verify(&self) -> bool {
        self.verify_certificates.unwrap_or(true)
    }

    /// Plain-text connection without TLS
    ///
    /// Credentials travel unencrypted. Use only against a relay on localhost.
    #[must_use]
    pub fn plaintext() -> Self {
        warn!("SMTP TLS disabled - credentials will be sent in clear text");
        Self {
            mode: TlsMode::None,
            ..Self::default()
        }
    }

    /// Resolve [`TlsMode::Auto`] against the port
    pub const fn effective_mode(&self, port: u16) -> TlsMode {
        match self.mode {
            TlsMode::Auto if port == 465 => TlsMode::Implicit,
            TlsMode::Auto => TlsMode::StartTls,
            other => other,
        }
    }
}

/// Connection and credential settings for an SMTP relay
#[derive(Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// Relay hostname
    #[serde(default = "default_host")]
    pub host: String,

    /// Relay port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login name
    #[serde(default)]
    pub username: String,

    /// Login password (sensitive - uses SecretString)
    #[serde(default = "empty_secret", skip_serializing)]
    pub password: SecretString,

    /// Envelope and header sender; defaults to `username`
    #[serde(default)]
    pub sender_email: Option<String>,

    /// Upper bound for one complete SMTP conversation, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TLS settings
    #[serde(default)]
    pub tls: TlsConfig,
}

fn default_host() -> String {
    "smtp.gmail.com".to_string()
}

const fn default_port() -> u16 {
    587
}

const fn default_timeout_secs() -> u64 {
    30
}

fn empty_secret() -> SecretString {
    SecretString::from(String::new())
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            username: String::new(),
            password: empty_secret(),
            sender_email: None,
            timeout_secs: default_timeout_secs(),
            tls: TlsConfig::default(),
        }
    }
}

impl fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("sender_email", &self.sender_email)
            .field("timeout_secs", &self.timeout_secs)
            .field("tls", &self.tls)
            .finish()
    }
}

impl SmtpConfig {
    /// Creates a configuration with the given credentials and defaults otherwise
    pub fn with_credentials(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
            ..Default::default()
        }
    }

    /// Sets the relay address
    #[must_use]
    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Sets the TLS configuration
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Both username and password are present
    pub fn is_configured(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.expose_secret().is_empty()
    }

    /// Address used in MAIL FROM and the From header
    pub fn sender(&self) -> &str {
        self.sender_email
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// `host:port` for connecting
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gmail_submission() {
        let config = SmtpConfig::default();
        assert_eq!(config.host, "smtp.gmail.com");
        assert_eq!(config.port, 587);
        assert!(!config.is_configured());
        assert_eq!(config.tls.effective_mode(config.port), TlsMode::StartTls);
    }

    #[test]
    fn port_465_uses_implicit_tls() {
        let tls = TlsConfig::default();
        assert_eq!(tls.effective_mode(465), TlsMode::Implicit);
        assert_eq!(tls.effective_mode(25), TlsMode::StartTls);
    }

    #[test]
    fn explicit_mode_overrides_port() {
        let tls = TlsConfig {
            mode: TlsMode::StartTls,
            ..TlsConfig::default()
        };
        assert_eq!(tls.effective_mode(465), TlsMode::StartTls);
        assert_eq!(TlsConfig::plaintext().effective_mode(465), TlsMode::None);
    }

    #[test]
    fn sender_defaults_to_username() {
        let mut config = SmtpConfig::with_credentials("me@example.com", "pw");
        assert_eq!(config.sender(), "me@example.com");

        config.sender_email = Some("noreply@example.com".into());
        assert_eq!(config.sender(), "noreply@example.com");

        config.sender_email = Some(String::new());
        assert_eq!(config.sender(), "me@example.com");
    }

    #[test]
    fn configured_requires_both_credentials() {
        assert!(SmtpConfig::with_credentials("me@example.com", "pw").is_configured());
        assert!(!SmtpConfig::with_credentials("me@example.com", "").is_configured());
        assert!(!SmtpConfig::with_credentials("", "pw").is_configured());
    }

    #[test]
    fn debug_redacts_password() {
        let config = SmtpConfig::with_credentials("me@example.com", "hunter2");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn tls_mode_deserializes_lowercase() {
        let tls: TlsConfig = serde_json::from_str(r#"{"mode":"implicit"}"#).unwrap();
        assert_eq!(tls.mode, TlsMode::Implicit);
        assert!(tls.should_verify());
        assert_eq!(tls.min_tls_version, "1.2");
    }
}
