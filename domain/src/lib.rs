//! Domain layer for opdeck
//!
//! This crate contains the core entities and value objects of the session
//! driver: conversation messages, tool results, model responses, and the
//! provider catalog. It has no dependencies on infrastructure or
//! presentation concerns.

pub mod core;
pub mod session;
pub mod tool;

// Re-export commonly used types
pub use core::{error::DomainError, provider::Provider};
pub use session::{
    entities::{ContentBlock, Message, Role},
    response::{ApiError, ModelResponse, StopReason, Usage},
};
pub use tool::value_objects::ToolResult;
