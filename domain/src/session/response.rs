//! Model API response types.
//!
//! These types mirror the structured responses returned by the model API:
//! an identifier, the content blocks, the stop reason, and token usage.
//! They carry the complete, explicit field set that the transcript's
//! `api_interaction` entries are allowed to record. Serialization goes
//! through these typed fields, never through a reflective dump, so request
//! secrets can never leak into a log line.

use crate::session::entities::{ContentBlock, Role};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Reason the model stopped generating.
///
/// Unknown wire values are preserved as [`StopReason::Other`] rather than
/// rejected, since new stop reasons appear between API versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Natural end of response, the model is done.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit, response may be truncated.
    MaxTokens,
    /// A configured stop sequence was produced.
    StopSequence,
    /// Provider-specific stop reason.
    Other(String),
}

impl StopReason {
    /// Get the string identifier for this stop reason
    pub fn as_str(&self) -> &str {
        match self {
            StopReason::EndTurn => "end_turn",
            StopReason::ToolUse => "tool_use",
            StopReason::MaxTokens => "max_tokens",
            StopReason::StopSequence => "stop_sequence",
            StopReason::Other(s) => s,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StopReason {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "end_turn" => StopReason::EndTurn,
            "tool_use" => StopReason::ToolUse,
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            other => StopReason::Other(other.to_string()),
        })
    }
}

impl Serialize for StopReason {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StopReason {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}

/// Token counts reported by the model API for one exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// A structured response from the model API.
///
/// Field for field, this is the whitelist of what an `api_interaction`
/// transcript entry may contain on the response side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// API-assigned response ID (e.g. "msg_abc123").
    pub id: String,
    /// Model that produced the response.
    pub model: String,
    /// Always `assistant` for API responses.
    pub role: Role,
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<StopReason>,
    /// The stop sequence hit, if `stop_reason` is `stop_sequence`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequence: Option<String>,
    /// Token usage for the exchange.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ModelResponse {
    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

/// Error surfaced by the model API during a turn.
///
/// Status-bearing errors display as `"<status> - <detail>"`; transport and
/// other errors display the detail alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// HTTP status code, when the failure was an API status error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Error body or description.
    pub detail: String,
}

impl ApiError {
    pub fn status(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }

    pub fn other(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} - {}", status, self.detail),
            None => write!(f, "{}", self.detail),
        }
    }
}

impl std::error::Error for ApiError {}
