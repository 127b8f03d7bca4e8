//! Email delivery service
//!
//! Relays a finished email through the configured mail transport.

use std::{fmt, sync::Arc};

use domain::{EmailAddress, OutgoingEmail};
use tracing::{info, instrument, warn};

use crate::{error::ApplicationError, ports::MailTransportPort};

/// Outcome of a successful delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Normalized recipient address
    pub recipient: String,
    /// Subject as sent
    pub subject: String,
    /// Message-ID header value
    pub message_id: String,
}

/// Sends emails on behalf of callers
pub struct EmailDeliveryService {
    transport: Arc<dyn MailTransportPort>,
}

impl fmt::Debug for EmailDeliveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailDeliveryService")
            .field("configured", &self.transport.is_configured())
            .finish()
    }
}

impl EmailDeliveryService {
    /// Create a new delivery service
    pub fn new(transport: Arc<dyn MailTransportPort>) -> Self {
        Self { transport }
    }

    /// Send an email
    ///
    /// Inputs are validated before the transport is consulted, so a bad
    /// address is reported even when SMTP is not configured.
    #[instrument(skip(self, subject, body, sender_name))]
    pub async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        sender_name: Option<String>,
    ) -> Result<DeliveryReceipt, ApplicationError> {
        let recipient = EmailAddress::new(recipient)?;
        let email = OutgoingEmail::new(recipient, subject, body, sender_name)?;

        if !self.transport.is_configured() {
            warn!("Email delivery requested but SMTP credentials are not configured");
            return Err(ApplicationError::MailNotConfigured);
        }

        let message_id = self.transport.send(&email).await?;
        info!(recipient = %email.recipient, %message_id, "Email sent");

        Ok(DeliveryReceipt {
            recipient: email.recipient.to_string(),
            subject: email.subject,
            message_id,
        })
    }
}
