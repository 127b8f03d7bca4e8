//! SMTP mail adapter - Implements MailTransportPort using integration_smtp

use application::{error::ApplicationError, ports::MailTransportPort};
use async_trait::async_trait;
use domain::OutgoingEmail;
use integration_smtp::{EmailComposition, SmtpClient, SmtpConfig, SmtpError};
use tracing::{info, instrument, warn};

/// Adapter for relaying mail through an SMTP server
#[derive(Debug)]
pub struct SmtpMailAdapter {
    client: SmtpClient,
}

impl SmtpMailAdapter {
    /// Create a new adapter with the given configuration
    pub const fn new(config: SmtpConfig) -> Self {
        Self {
            client: SmtpClient::new(config),
        }
    }

    /// Map SmtpError to ApplicationError
    fn map_error(e: SmtpError) -> ApplicationError {
        match e {
            SmtpError::NotConfigured => ApplicationError::MailNotConfigured,
            other => ApplicationError::MailDelivery(other.to_string()),
        }
    }

    fn compose(email: &OutgoingEmail) -> EmailComposition {
        EmailComposition::new(
            email.recipient.as_str(),
            &email.sender_name,
            &email.subject,
            &email.body,
        )
    }
}

#[async_trait]
impl MailTransportPort for SmtpMailAdapter {
    #[instrument(skip(self, email), fields(recipient_domain = %email.recipient.domain()))]
    async fn send(&self, email: &OutgoingEmail) -> Result<String, ApplicationError> {
        let composition = Self::compose(email);

        match self.client.send_email(&composition).await {
            Ok(message_id) => {
                info!(message_id = %message_id, "Email relayed");
                Ok(message_id)
            },
            Err(e) => {
                warn!(error = %e, "Email relay failed");
                Err(Self::map_error(e))
            },
        }
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use domain::EmailAddress;

    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail::new(
            EmailAddress::new("john@example.com").unwrap(),
            "Meeting Follow-up",
            "Hi John",
            None,
        )
        .unwrap()
    }

    #[test]
    fn composition_carries_every_field() {
        let composition = SmtpMailAdapter::compose(&email());
        assert_eq!(composition.to, "john@example.com");
        assert_eq!(composition.sender_name, "EmailCraft AI");
        assert_eq!(composition.subject, "Meeting Follow-up");
        assert_eq!(composition.body, "Hi John");
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            SmtpMailAdapter::map_error(SmtpError::NotConfigured),
            ApplicationError::MailNotConfigured
        ));
        let err = SmtpMailAdapter::map_error(SmtpError::AuthenticationFailed("535".into()));
        assert!(matches!(err, ApplicationError::MailDelivery(ref m) if m.contains("535")));
    }

    #[test]
    fn configuration_reflects_credentials() {
        assert!(!SmtpMailAdapter::new(SmtpConfig::default()).is_configured());
        assert!(SmtpMailAdapter::new(SmtpConfig::with_credentials("a@b.com", "pw")).is_configured());
    }

    #[tokio::test]
    async fn unconfigured_relay_reports_not_configured() {
        let adapter = SmtpMailAdapter::new(SmtpConfig::default());
        let err = adapter.send(&email()).await.unwrap_err();
        assert!(matches!(err, ApplicationError::MailNotConfigured));
    }
}
