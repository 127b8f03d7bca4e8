//! Application state shared across handlers

use std::sync::Arc;

use application::{EmailDeliveryService, EmailDraftService};

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Draft generation pipeline
    pub draft_service: Arc<EmailDraftService>,
    /// SMTP relay
    pub delivery_service: Arc<EmailDeliveryService>,
}

impl AppState {
    pub fn new(draft_service: EmailDraftService, delivery_service: EmailDeliveryService) -> Self {
        Self {
            draft_service: Arc::new(draft_service),
            delivery_service: Arc::new(delivery_service),
        }
    }
}
