//! Conversation session domain.
//!
//! - [`entities::Message`]: a single message within a conversation
//! - [`entities::ContentBlock`]: one block of message content (text, tool use, tool result)
//! - [`response::ModelResponse`]: a structured model API response
//! - [`response::ApiError`]: an error surfaced by the model API

pub mod entities;
pub mod response;
