//! # SiteVerify Core
//!
//! Core business logic and domain layer for the SiteVerify backend.
//! This crate contains the verification entities and their state machine,
//! the verification service that orchestrates issuance and checking,
//! the traits implemented by the infrastructure layer, and error types.

pub mod domain;
pub mod services;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use errors::*;
