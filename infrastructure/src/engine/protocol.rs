//! Wire protocol for the sampling engine bridge.
//!
//! The driver and the engine child process exchange newline-delimited JSON
//! over stdio:
//!
//! - **Driver → engine**: one `turn` frame per user turn, carrying the
//!   [`TurnRequest`] fields.
//! - **Engine → driver**: one event object per line (`assistant`,
//!   `tool_result`, and `api` progress events), closed by a terminal `done`
//!   or `fail` event.
//!
//! Parsing and encoding are pure functions with no side effects so the
//! dispatch table can be tested without a child process.

use opdeck_application::{EngineError, TurnRequest};
use opdeck_domain::{ApiError, ContentBlock, Message, ModelResponse, ToolResult};
use serde::{Deserialize, Serialize};

/// One driver → engine request line.
#[derive(Debug, Serialize)]
struct TurnFrame<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    request: &'a TurnRequest,
}

/// Encode a turn request as a single JSON line (without the trailing newline).
pub fn encode_turn(request: &TurnRequest) -> Result<String, EngineError> {
    let frame = TurnFrame {
        kind: "turn",
        request,
    };
    serde_json::to_string(&frame)
        .map_err(|e| EngineError::Protocol(format!("failed to encode turn request: {}", e)))
}

/// One engine → driver event line, classified by its `type` tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// The model produced a content block (text or tool use).
    Assistant { block: ContentBlock },
    /// A tool invocation finished.
    ToolResult { tool_id: String, result: ToolResult },
    /// One API round trip completed (or failed).
    Api {
        request: serde_json::Value,
        #[serde(default)]
        response: Option<ModelResponse>,
        #[serde(default)]
        error: Option<ApiError>,
    },
    /// Terminal: the turn finished; `messages` is the full updated history.
    Done { messages: Vec<Message> },
    /// Terminal: the turn failed inside the engine.
    Fail { message: String },
}

/// Parse one event line.
///
/// The raw line is deliberately not echoed into the error; tool results can
/// carry large image payloads.
pub fn parse_event(line: &str) -> Result<EngineEvent, EngineError> {
    serde_json::from_str(line)
        .map_err(|e| EngineError::Protocol(format!("bad event line ({} bytes): {}", line.len(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use opdeck_domain::Provider;

    fn request() -> TurnRequest {
        TurnRequest {
            system_prompt_suffix: "be brief".to_string(),
            model: "claude-3-5-sonnet-20241022".to_string(),
            provider: Provider::Anthropic,
            messages: vec![Message::user_text("hello")],
            api_key: "sk-ant-test".to_string(),
            max_recent_images: 10,
        }
    }

    #[test]
    fn test_encode_turn_frame() {
        let line = encode_turn(&request()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["type"], "turn");
        assert_eq!(value["model"], "claude-3-5-sonnet-20241022");
        assert_eq!(value["provider"], "anthropic");
        assert_eq!(value["max_recent_images"], 10);
        assert_eq!(value["messages"][0]["role"], "user");
        // Display-only settings stay on the driver side
        assert!(value.get("hide_images").is_none());
    }

    #[test]
    fn test_parse_assistant_event() {
        let line = r#"{"type":"assistant","block":{"type":"text","text":"hi"}}"#;
        match parse_event(line).unwrap() {
            EngineEvent::Assistant { block } => assert_eq!(block.as_text(), Some("hi")),
            other => panic!("expected assistant event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tool_result_event() {
        let line = r#"{"type":"tool_result","tool_id":"toolu_01","result":{"output":"done"}}"#;
        match parse_event(line).unwrap() {
            EngineEvent::ToolResult { tool_id, result } => {
                assert_eq!(tool_id, "toolu_01");
                assert_eq!(result.output.as_deref(), Some("done"));
            }
            other => panic!("expected tool_result event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_api_event_with_error() {
        let line = r#"{"type":"api","request":{"model":"m"},"error":{"status":529,"detail":"overloaded"}}"#;
        match parse_event(line).unwrap() {
            EngineEvent::Api {
                request,
                response,
                error,
            } => {
                assert_eq!(request["model"], "m");
                assert!(response.is_none());
                let error = error.unwrap();
                assert_eq!(error.status, Some(529));
                assert_eq!(error.detail, "overloaded");
            }
            other => panic!("expected api event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_done_event() {
        let line = r#"{"type":"done","messages":[{"role":"assistant","content":[{"type":"text","text":"hi"}]}]}"#;
        match parse_event(line).unwrap() {
            EngineEvent::Done { messages } => {
                assert_eq!(messages.len(), 1);
                assert_eq!(messages[0].text_content(), "hi");
            }
            other => panic!("expected done event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_fail_event() {
        let line = r#"{"type":"fail","message":"engine exploded"}"#;
        match parse_event(line).unwrap() {
            EngineEvent::Fail { message } => assert_eq!(message, "engine exploded"),
            other => panic!("expected fail event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_unknown_event_type() {
        let err = parse_event(r#"{"type":"telemetry","data":1}"#).unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }

    #[test]
    fn test_parse_garbage_line() {
        let err = parse_event("not json at all").unwrap_err();
        assert!(matches!(err, EngineError::Protocol(_)));
    }
}
