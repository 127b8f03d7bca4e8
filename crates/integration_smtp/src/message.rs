//! RFC 5322 message construction

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plain-text email to a single recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailComposition {
    /// Recipient address
    pub to: String,
    /// Display name for the From header
    pub sender_name: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl EmailComposition {
    /// Creates a new composition
    pub fn new(
        to: impl Into<String>,
        sender_name: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            sender_name: sender_name.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Generates a globally unique Message-ID for the sender's domain
pub fn generate_message_id(sender: &str) -> String {
    let domain = sender
        .rsplit_once('@')
        .map(|(_, d)| d)
        .filter(|d| !d.is_empty())
        .unwrap_or("emailcraft.local");
    format!(
        "<{}.{}@{}>",
        Utc::now().timestamp_millis(),
        uuid::Uuid::new_v4(),
        domain
    )
}

/// Renders headers and body, ready for the DATA phase
///
/// Line endings are normalized to CRLF. Dot-stuffing is left to the
/// transport.
pub fn build_message(
    sender: &str,
    email: &EmailComposition,
    message_id: &str,
    date: DateTime<Utc>,
) -> String {
    let from = format!("{} <{sender}>", display_name(&email.sender_name));

    let headers = format!(
        "From: {from}\r\n\
         To: {}\r\n\
         Subject: {}\r\n\
         Date: {}\r\n\
         Message-ID: {message_id}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=utf-8\r\n\
         Content-Transfer-Encoding: 8bit\r\n",
        single_line(&email.to),
        encode_header(&single_line(&email.subject)),
        date.format("%a, %d %b %Y %H:%M:%S +0000"),
    );

    format!("{headers}\r\n{}", normalize_line_endings(&email.body))
}

/// Strips CR and LF so user input cannot inject headers
fn single_line(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}

/// Quoted display name, or an encoded-word when it is not ASCII
fn display_name(name: &str) -> String {
    let cleaned = single_line(name);
    if cleaned.is_ascii() {
        format!("\"{}\"", cleaned.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        encode_header(&cleaned)
    }
}

/// RFC 2047 encoded-word for non-ASCII header values
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!(
            "=?UTF-8?B?{}?=",
            base64::engine::general_purpose::STANDARD.encode(value.as_bytes())
        )
    }
}

fn normalize_line_endings(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\n', "\r\n")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap()
    }

    #[test]
    fn builds_headers_and_body() {
        let email = EmailComposition::new("bob@example.com", "EmailCraft AI", "Hello", "Hi Bob");
        let msg = build_message("me@example.com", &email, "<1@example.com>", fixed_date());

        assert!(msg.starts_with("From: \"EmailCraft AI\" <me@example.com>\r\n"));
        assert!(msg.contains("To: bob@example.com\r\n"));
        assert!(msg.contains("Subject: Hello\r\n"));
        assert!(msg.contains("Date: Tue, 05 Mar 2024 14:07:09 +0000\r\n"));
        assert!(msg.contains("Message-ID: <1@example.com>\r\n"));
        assert!(msg.contains("Content-Type: text/plain; charset=utf-8\r\n"));
        assert!(msg.ends_with("\r\n\r\nHi Bob"));
    }

    #[test]
    fn body_line_endings_are_crlf() {
        let email = EmailComposition::new("b@example.com", "A", "S", "one\ntwo\r\nthree");
        let msg = build_message("a@example.com", &email, "<x@y>", fixed_date());
        assert!(msg.ends_with("one\r\ntwo\r\nthree"));
    }

    #[test]
    fn subject_cannot_inject_headers() {
        let email = EmailComposition::new("b@example.com", "A", "Hi\r\nBcc: evil@x.com", "B");
        let msg = build_message("a@example.com", &email, "<x@y>", fixed_date());
        assert!(!msg.contains("\r\nBcc:"));
    }

    #[test]
    fn display_name_quotes_are_escaped() {
        let email = EmailComposition::new("b@example.com", "Al \"The Boss\"", "S", "B");
        let msg = build_message("a@example.com", &email, "<x@y>", fixed_date());
        assert!(msg.starts_with("From: \"Al \\\"The Boss\\\"\" <a@example.com>"));
    }

    #[test]
    fn non_ascii_subject_is_encoded() {
        let email = EmailComposition::new("b@example.com", "A", "Grüße", "B");
        let msg = build_message("a@example.com", &email, "<x@y>", fixed_date());
        assert!(msg.contains("Subject: =?UTF-8?B?R3LDvMOfZQ==?=\r\n"));
    }

    #[test]
    fn message_id_uses_sender_domain() {
        let id = generate_message_id("me@example.org");
        assert!(id.starts_with('<'));
        assert!(id.ends_with("@example.org>"));

        let fallback = generate_message_id("not-an-address");
        assert!(fallback.ends_with("@emailcraft.local>"));
    }

    #[test]
    fn message_ids_are_unique() {
        assert_ne!(generate_message_id("a@b.c"), generate_message_id("a@b.c"));
    }

    proptest::proptest! {
        #[test]
        fn headers_never_gain_extra_lines(subject in ".*", name in ".*") {
            let email = EmailComposition::new("b@example.com", name, subject, "body");
            let msg = build_message("a@example.com", &email, "<x@y>", fixed_date());
            let (headers, _) = msg.split_once("\r\n\r\n").unwrap();
            proptest::prop_assert_eq!(headers.split("\r\n").count(), 8);
        }
    }
}
