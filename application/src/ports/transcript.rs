//! Port for append-only session transcript logging.
//!
//! Defines the [`TranscriptLogger`] trait for recording session events
//! (user input, assistant output, tool calls and results, API exchanges)
//! as structured entries.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures the session
//! transcript as a machine-readable audit record (JSONL). Every operation
//! is therefore fallible: a dropped write is a hole in the record, and
//! whether to continue is the caller's decision, not the logger's.

use chrono::{DateTime, SecondsFormat, Utc};
use opdeck_domain::session::entities::{ContentBlock, Message};
use opdeck_domain::session::response::{ApiError, ModelResponse};
use opdeck_domain::tool::value_objects::ToolResult;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use thiserror::Error;

/// Errors from transcript recording.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Could not create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not append to transcript {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not serialize transcript entry: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Classification of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    UserInput,
    AssistantResponse,
    ToolUse,
    ToolResult,
    Error,
    ApiInteraction,
}

impl EntryType {
    /// Wire tag written to the `type` field of the JSONL line
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::UserInput => "user_input",
            EntryType::AssistantResponse => "assistant_response",
            EntryType::ToolUse => "tool_use",
            EntryType::ToolResult => "tool_result",
            EntryType::Error => "error",
            EntryType::ApiInteraction => "api_interaction",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of a transcript entry.
///
/// A closed union: each variant has exactly one serialization path, so the
/// transcript shape for a given entry kind never varies with the runtime
/// type of the payload.
#[derive(Debug, Clone)]
pub enum LogContent {
    /// Already-structured payload, recorded as-is.
    Message(Value),
    /// Full model API response, recorded through its typed field set.
    ModelResponse(ModelResponse),
    /// Tool result, recorded with the image payload reduced to a presence
    /// flag; raw screenshot bytes never reach the transcript.
    ToolResult(ToolResult),
    /// Stringified fallback.
    Other(String),
}

impl LogContent {
    /// Serialize this payload to its transcript form.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        match self {
            LogContent::Message(value) => Ok(value.clone()),
            LogContent::ModelResponse(response) => serde_json::to_value(response),
            LogContent::ToolResult(result) => Ok(json!({
                "output": result.output,
                "error": result.error,
                "base64_image": result.has_image(),
                "system": result.system,
            })),
            LogContent::Other(text) => Ok(Value::String(text.clone())),
        }
    }
}

/// One immutable transcript record.
///
/// Serialized line shape:
/// `{"timestamp": <ISO-8601>, "type": <tag>, "content": ..., "metadata": {...}}`
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub entry_type: EntryType,
    pub content: LogContent,
    pub metadata: Map<String, Value>,
}

impl LogEntry {
    /// Create an entry stamped with the current time and empty metadata.
    pub fn new(entry_type: EntryType, content: LogContent) -> Self {
        Self {
            timestamp: Utc::now(),
            entry_type,
            content,
            metadata: Map::new(),
        }
    }

    /// Attach one metadata key.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Serialize to the single-object wire form.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        Ok(json!({
            "timestamp": self.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            "type": self.entry_type.as_str(),
            "content": self.content.to_value()?,
            "metadata": Value::Object(self.metadata.clone()),
        }))
    }
}

/// Reduce a raw API request to its whitelisted transcript form.
///
/// Only `model`, `provider`, and `max_tokens` pass through; `messages` is
/// reduced to a `message_count` integer. Everything else (auth headers,
/// API keys, full message bodies) is dropped. Non-object requests are
/// stringified.
pub fn whitelist_api_request(request: &Value) -> Value {
    let Value::Object(object) = request else {
        return match request {
            Value::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        };
    };

    let mut summary = Map::new();
    for key in ["model", "provider", "max_tokens"] {
        if let Some(value) = object.get(key) {
            summary.insert(key.to_string(), value.clone());
        }
    }
    if let Some(messages) = object.get("messages").and_then(Value::as_array) {
        summary.insert("message_count".to_string(), Value::from(messages.len()));
    }
    Value::Object(summary)
}

/// Port for recording session transcript entries.
///
/// Implementations append each [`LogEntry`] as a single record (one JSONL
/// line). The `log_*` wrappers build the entry for each event kind; only
/// [`append`](Self::append) must be implemented.
pub trait TranscriptLogger: Send + Sync {
    /// Append one entry to the transcript.
    fn append(&self, entry: LogEntry) -> Result<(), TranscriptError>;

    /// Record a user message.
    fn log_user_input(&self, message: &Message) -> Result<(), TranscriptError> {
        let content = LogContent::Message(serde_json::to_value(message)?);
        self.append(LogEntry::new(EntryType::UserInput, content))
    }

    /// Record one assistant content block.
    fn log_assistant_response(&self, block: &ContentBlock) -> Result<(), TranscriptError> {
        let content = LogContent::Message(serde_json::to_value(block)?);
        self.append(LogEntry::new(EntryType::AssistantResponse, content))
    }

    /// Record a tool invocation request.
    fn log_tool_use(
        &self,
        name: &str,
        input: &Value,
        tool_id: &str,
    ) -> Result<(), TranscriptError> {
        let content = LogContent::Message(json!({ "name": name, "input": input }));
        let entry = LogEntry::new(EntryType::ToolUse, content)
            .with_metadata("tool_id", Value::String(tool_id.to_string()));
        self.append(entry)
    }

    /// Record a tool result.
    fn log_tool_result(&self, result: &ToolResult, tool_id: &str) -> Result<(), TranscriptError> {
        let entry = LogEntry::new(EntryType::ToolResult, LogContent::ToolResult(result.clone()))
            .with_metadata("tool_id", Value::String(tool_id.to_string()));
        self.append(entry)
    }

    /// Record an error event.
    fn log_error(&self, kind: &str, message: &str) -> Result<(), TranscriptError> {
        let content = LogContent::Message(json!({ "type": kind, "message": message }));
        self.append(LogEntry::new(EntryType::Error, content))
    }

    /// Record one API exchange, the request side reduced to the whitelist.
    fn log_api_interaction(
        &self,
        request: &Value,
        response: Option<&ModelResponse>,
        error: Option<&ApiError>,
    ) -> Result<(), TranscriptError> {
        let response_value = match response {
            Some(response) => serde_json::to_value(response)?,
            None => Value::Null,
        };
        let content = LogContent::Message(json!({
            "request": whitelist_api_request(request),
            "response": response_value,
            "error": error.map(|e| e.to_string()),
        }));
        self.append(LogEntry::new(EntryType::ApiInteraction, content))
    }
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoTranscriptLogger;

impl TranscriptLogger for NoTranscriptLogger {
    fn append(&self, _entry: LogEntry) -> Result<(), TranscriptError> {
        Ok(())
    }
}
