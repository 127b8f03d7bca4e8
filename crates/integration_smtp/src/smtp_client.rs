//! Async SMTP client
//!
//! A small submission client built on tokio and tokio-native-tls. Supports
//! implicit TLS, STARTTLS and plain connections, authenticating with
//! AUTH PLAIN.

use std::time::Duration;

use base64::Engine;
use chrono::Utc;
use secrecy::ExposeSecret;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    net::TcpStream,
};
use tracing::{debug, error, instrument, trace};

use crate::{
    EmailComposition, SmtpConfig, SmtpError, TlsMode,
    message::{build_message, generate_message_id},
    tls::build_tls_connector,
};

/// SMTP client for a single relay
#[derive(Debug, Clone)]
pub struct SmtpClient {
    config: SmtpConfig,
}

impl SmtpClient {
    /// Creates a new SMTP client with the given configuration
    pub const fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    /// Whether credentials are present
    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// Sends an email, returning its Message-ID
    ///
    /// The whole conversation, including connect and TLS handshake, is
    /// bounded by `timeout_secs`.
    #[instrument(skip(self, email), fields(host = %self.config.host, port = self.config.port))]
    pub async fn send_email(&self, email: &EmailComposition) -> Result<String, SmtpError> {
        if !self.config.is_configured() {
            return Err(SmtpError::NotConfigured);
        }

        let sender = self.config.sender().to_string();
        let message_id = generate_message_id(&sender);
        let content = build_message(&sender, email, &message_id, Utc::now());

        debug!(to = %email.to, "Sending email");

        let deadline = Duration::from_secs(self.config.timeout_secs);
        tokio::time::timeout(deadline, self.deliver(&sender, &email.to, &content))
            .await
            .map_err(|_| SmtpError::Timeout(self.config.timeout_secs))??;

        debug!(message_id = %message_id, "Email sent successfully");
        Ok(message_id)
    }

    /// Opens the connection and runs the conversation in the configured mode
    async fn deliver(&self, sender: &str, to: &str, content: &str) -> Result<(), SmtpError> {
        let stream = TcpStream::connect(self.config.address()).await.map_err(|e| {
            error!(error = %e, "Failed to connect to SMTP server");
            SmtpError::ConnectionFailed(e.to_string())
        })?;

        match self.config.tls.effective_mode(self.config.port) {
            TlsMode::Implicit => {
                let tls = build_tls_connector(&self.config.tls)?;
                let stream = tls
                    .connect(&self.config.host, stream)
                    .await
                    .map_err(|e| SmtpError::Tls(format!("TLS handshake failed: {e}")))?;
                let mut conn = BufReader::new(stream);
                expect_greeting(&mut conn).await?;
                self.transaction(&mut conn, sender, to, content).await
            },
            TlsMode::StartTls | TlsMode::Auto => {
                let mut conn = BufReader::new(stream);
                expect_greeting(&mut conn).await?;
                ehlo(&mut conn).await?;
                command(&mut conn, "STARTTLS", "220").await?;

                let tls = build_tls_connector(&self.config.tls)?;
                let stream = tls
                    .connect(&self.config.host, conn.into_inner())
                    .await
                    .map_err(|e| SmtpError::Tls(format!("STARTTLS upgrade failed: {e}")))?;
                let mut conn = BufReader::new(stream);
                self.transaction(&mut conn, sender, to, content).await
            },
            TlsMode::None => {
                let mut conn = BufReader::new(stream);
                expect_greeting(&mut conn).await?;
                self.transaction(&mut conn, sender, to, content).await
            },
        }
    }

    /// EHLO, AUTH, envelope, DATA and QUIT on an established connection
    async fn transaction<S>(
        &self,
        conn: &mut BufReader<S>,
        sender: &str,
        to: &str,
        content: &str,
    ) -> Result<(), SmtpError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        ehlo(conn).await?;

        let credentials = format!(
            "\0{}\0{}",
            self.config.username,
            self.config.password.expose_secret()
        );
        let auth = base64::engine::general_purpose::STANDARD.encode(credentials);
        send_line(conn, &format!("AUTH PLAIN {auth}")).await?;
        let reply = read_reply(conn).await?;
        if !reply.starts_with("235") {
            return Err(SmtpError::AuthenticationFailed(reply.trim().to_string()));
        }

        command(conn, &format!("MAIL FROM:<{sender}>"), "250").await?;
        command(conn, &format!("RCPT TO:<{to}>"), "25").await?;
        command(conn, "DATA", "354").await?;

        conn.write_all(dot_stuff(content).as_bytes())
            .await
            .map_err(|e| SmtpError::Io(format!("Failed to send content: {e}")))?;
        conn.write_all(b"\r\n.\r\n")
            .await
            .map_err(|e| SmtpError::Io(format!("Failed to end DATA: {e}")))?;
        conn.flush().await.ok();
        expect_reply(conn, "end of DATA", "250").await?;

        // The message is queued; a failed QUIT does not matter
        if send_line(conn, "QUIT").await.is_ok() {
            read_reply(conn).await.ok();
        }

        Ok(())
    }
}

/// Escape lines beginning with a dot
fn dot_stuff(content: &str) -> String {
    let stuffed = content.replace("\r\n.", "\r\n..");
    if stuffed.starts_with('.') {
        format!(".{stuffed}")
    } else {
        stuffed
    }
}

fn local_hostname() -> String {
    hostname::get().map_or_else(
        |_| "localhost".to_string(),
        |h| h.to_string_lossy().to_string(),
    )
}

async fn expect_greeting<S>(conn: &mut BufReader<S>) -> Result<(), SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    expect_reply(conn, "greeting", "220").await.map(|_| ())
}

async fn ehlo<S>(conn: &mut BufReader<S>) -> Result<String, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    command(conn, &format!("EHLO {}", local_hostname()), "250").await
}

/// Sends a command and checks the reply code prefix
async fn command<S>(
    conn: &mut BufReader<S>,
    line: &str,
    expected: &str,
) -> Result<String, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    send_line(conn, line).await?;
    let verb = line.split([' ', ':']).next().unwrap_or(line);
    expect_reply(conn, verb, expected).await
}

async fn send_line<S>(conn: &mut BufReader<S>, line: &str) -> Result<(), SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    trace!(command = %line.split(' ').next().unwrap_or(line), "Sending SMTP command");
    conn.write_all(format!("{line}\r\n").as_bytes())
        .await
        .map_err(|e| SmtpError::Io(format!("Failed to send command: {e}")))?;
    conn.flush().await.ok();
    Ok(())
}

async fn expect_reply<S>(
    conn: &mut BufReader<S>,
    label: &str,
    expected: &str,
) -> Result<String, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let reply = read_reply(conn).await?;
    if reply.starts_with(expected) {
        Ok(reply)
    } else {
        Err(SmtpError::UnexpectedReply {
            command: label.to_string(),
            reply: reply.trim().to_string(),
        })
    }
}

/// Reads a possibly multi-line reply
async fn read_reply<S>(conn: &mut BufReader<S>) -> Result<String, SmtpError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut reply = String::new();
    loop {
        let mut line = String::new();
        let read = conn
            .read_line(&mut line)
            .await
            .map_err(|e| SmtpError::Io(format!("Failed to read response: {e}")))?;
        if read == 0 {
            return Err(SmtpError::Io("Connection closed by server".to_string()));
        }

        trace!(line = %line.trim(), "SMTP response");
        reply.push_str(&line);

        // Continuation lines carry a hyphen after the code
        if line.len() < 4 || line.as_bytes()[3] != b'-' {
            break;
        }
    }
    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TlsConfig;

    fn test_config() -> SmtpConfig {
        SmtpConfig::with_credentials("sender@example.com", "app-password")
            .with_server("127.0.0.1", 2525)
            .with_tls(TlsConfig::plaintext())
    }

    #[test]
    fn smtp_client_has_debug() {
        let client = SmtpClient::new(test_config());
        let debug = format!("{client:?}");
        assert!(debug.contains("SmtpClient"));
        assert!(!debug.contains("app-password"));
    }

    #[test]
    fn dot_stuffing() {
        assert_eq!(dot_stuff("a\r\n.b\r\n..c"), "a\r\n..b\r\n...c");
        assert_eq!(dot_stuff(".start"), "..start");
        assert_eq!(dot_stuff("no dots"), "no dots");
    }

    #[tokio::test]
    async fn unconfigured_client_sends_nothing() {
        let client = SmtpClient::new(SmtpConfig::default());
        let email = EmailComposition::new("b@example.com", "A", "S", "B");
        let err = client.send_email(&email).await.unwrap_err();
        assert!(matches!(err, SmtpError::NotConfigured));
    }

    #[tokio::test]
    async fn multi_line_reply_is_read_completely() {
        let (client, mut server) = tokio::io::duplex(256);
        server
            .write_all(b"250-smtp.example.com\r\n250-AUTH PLAIN\r\n250 OK\r\n")
            .await
            .unwrap();

        let mut conn = BufReader::new(client);
        let reply = read_reply(&mut conn).await.unwrap();
        assert_eq!(reply.lines().count(), 3);
        assert!(reply.ends_with("250 OK\r\n"));
    }

    #[tokio::test]
    async fn closed_connection_is_an_error() {
        let (client, server) = tokio::io::duplex(64);
        drop(server);

        let mut conn = BufReader::new(client);
        let err = read_reply(&mut conn).await.unwrap_err();
        assert!(matches!(err, SmtpError::Io(_)));
    }

    #[tokio::test]
    async fn unexpected_code_is_reported() {
        let (client, mut server) = tokio::io::duplex(64);
        server.write_all(b"554 go away\r\n").await.unwrap();

        let mut conn = BufReader::new(client);
        let err = expect_greeting(&mut conn).await.unwrap_err();
        assert!(matches!(
            err,
            SmtpError::UnexpectedReply { ref command, ref reply } if command == "greeting" && reply == "554 go away"
        ));
    }
}
