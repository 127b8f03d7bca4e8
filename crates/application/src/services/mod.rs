//! Application services - Use case implementations

mod email_delivery_service;
mod email_draft_service;
mod prompt_compiler;
mod request_validator;
mod response_parser;

pub use email_delivery_service::{DeliveryReceipt, EmailDeliveryService};
pub use email_draft_service::EmailDraftService;
pub use prompt_compiler::{PromptCompiler, SYSTEM_INSTRUCTIONS};
pub use request_validator::RequestValidator;
pub use response_parser::ResponseParser;
