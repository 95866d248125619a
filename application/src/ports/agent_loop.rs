//! Agent loop port.
//!
//! The sampling loop (the routine that repeatedly queries the model and
//! executes whatever tools it requests until a final answer emerges)
//! lives outside this codebase. [`AgentLoop`] is the seam: the driver
//! hands over the full conversation plus settings, the loop reports
//! progress through a [`TurnObserver`], and the updated conversation
//! comes back when the turn finishes.

use crate::ports::observer::TurnObserver;
use async_trait::async_trait;
use opdeck_domain::core::provider::Provider;
use opdeck_domain::session::entities::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from driving the external sampling loop.
///
/// All variants are recoverable from the driver's point of view: the turn
/// is reported as failed and the session continues.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to launch agent engine `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("Engine transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("Engine protocol error: {0}")]
    Protocol(String),

    #[error("Engine exited before completing the turn")]
    Disconnected,

    #[error("Turn failed: {0}")]
    TurnFailed(String),
}

impl EngineError {
    /// Short classification used as the `type` of transcript error entries
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Spawn { .. } => "EngineSpawnError",
            EngineError::Transport(_) => "EngineTransportError",
            EngineError::Protocol(_) => "EngineProtocolError",
            EngineError::Disconnected => "EngineDisconnected",
            EngineError::TurnFailed(_) => "TurnFailed",
        }
    }
}

/// Everything the sampling loop needs to run one turn.
///
/// `hide_images` is deliberately absent: it only affects terminal display,
/// never the loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRequest {
    /// Extra instructions appended to the loop's own system prompt.
    pub system_prompt_suffix: String,
    /// Model identifier to sample from.
    pub model: String,
    /// Backend the loop should use.
    pub provider: Provider,
    /// Full conversation history, user turn included.
    pub messages: Vec<Message>,
    /// API key for providers that take one directly.
    pub api_key: String,
    /// How many most-recent screenshots the loop keeps in model context.
    pub max_recent_images: usize,
}

/// Port for the external sampling loop.
#[async_trait]
pub trait AgentLoop: Send + Sync {
    /// Run one turn to completion.
    ///
    /// Invokes `observer` callbacks as the turn progresses and resolves to
    /// the updated conversation history. On error the caller keeps its own
    /// last known history.
    async fn run_turn(
        &self,
        request: TurnRequest,
        observer: &dyn TurnObserver,
    ) -> Result<Vec<Message>, EngineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_request_serializes_for_the_wire() {
        let request = TurnRequest {
            system_prompt_suffix: String::new(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            provider: Provider::Anthropic,
            messages: vec![Message::user_text("hello")],
            api_key: "sk-ant-test".to_string(),
            max_recent_images: 10,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["provider"], "anthropic");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["max_recent_images"], 10);
    }

    #[test]
    fn engine_error_kinds() {
        assert_eq!(
            EngineError::TurnFailed("boom".to_string()).kind(),
            "TurnFailed"
        );
        assert_eq!(EngineError::Disconnected.kind(), "EngineDisconnected");
    }
}
