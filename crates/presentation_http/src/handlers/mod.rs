//! HTTP request handlers

pub mod email;
pub mod health;
