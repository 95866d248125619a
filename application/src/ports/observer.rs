//! Turn progress port.
//!
//! [`TurnObserver`] is an **output port** that the presentation layer
//! implements to surface agent-loop progress while a turn is running.
//! The loop invokes the callbacks zero or more times per turn, always
//! synchronously with its own progress; two callbacks never run
//! concurrently.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use opdeck_domain::session::entities::ContentBlock;
use opdeck_domain::session::response::{ApiError, ModelResponse};
use opdeck_domain::tool::value_objects::ToolResult;
use serde_json::Value;

/// Callbacks invoked by the agent loop as a turn progresses.
pub trait TurnObserver: Send + Sync {
    /// Called for each content block the model produces (text or tool use).
    fn on_assistant_block(&self, _block: &ContentBlock) {}

    /// Called when a tool invocation completes.
    fn on_tool_output(&self, _result: &ToolResult, _tool_id: &str) {}

    /// Called after each model API exchange, successful or not.
    ///
    /// `request` is the raw request the loop sent (reduced to a whitelist
    /// before any of it is recorded); exactly one of `response` / `error`
    /// is present for a completed exchange.
    fn on_api_exchange(
        &self,
        _request: &Value,
        _response: Option<&ModelResponse>,
        _error: Option<&ApiError>,
    ) {
    }
}

/// No-op implementation for when progress isn't needed
pub struct NoTurnObserver;

impl TurnObserver for NoTurnObserver {}
