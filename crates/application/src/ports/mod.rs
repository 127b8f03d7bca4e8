//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod generation_port;
mod mail_transport_port;

#[cfg(test)]
pub use generation_port::MockGenerationPort;
pub use generation_port::{GenerationPort, ModelReply};
#[cfg(test)]
pub use mail_transport_port::MockMailTransportPort;
pub use mail_transport_port::MailTransportPort;
