//! Application layer - Use cases and orchestration
//!
//! Turns raw generation requests into email drafts and relays finished
//! emails. Talks to the outside world only through the ports defined here;
//! adapters in the infrastructure layer implement them.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
