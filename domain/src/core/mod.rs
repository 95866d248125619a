//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::Provider`]: API backends the agent engine can talk to
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod provider;
