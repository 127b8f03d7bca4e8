//! Mail transport port - Interface for relaying finished emails

use async_trait::async_trait;
use domain::OutgoingEmail;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for delivering an email to its recipient
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MailTransportPort: Send + Sync {
    /// Send the email, returning the Message-ID that was assigned
    async fn send(&self, email: &OutgoingEmail) -> Result<String, ApplicationError>;

    /// Whether credentials for the relay are present
    fn is_configured(&self) -> bool;
}
