//! Session domain entities

use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single block of message content.
///
/// Conversation messages carry an array of blocks rather than a plain
/// string, mixing text with tool use requests and tool results. The wire
/// form is a tagged object:
///
/// ```
/// use opdeck_domain::session::entities::ContentBlock;
///
/// let block: ContentBlock =
///     serde_json::from_str(r#"{"type": "text", "text": "hello"}"#).unwrap();
/// assert_eq!(block.as_text(), Some("hello"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text block from the user or the model.
    Text { text: String },

    /// A tool use request from the model.
    ToolUse {
        /// API-assigned ID for correlating with tool results (e.g. "toolu_abc123").
        id: String,
        /// Tool name (e.g. "computer", "bash", "str_replace_editor").
        name: String,
        /// Structured arguments for the tool.
        input: serde_json::Value,
    },

    /// The outcome of a tool invocation, echoed back to the model.
    ToolResult {
        /// ID of the `ToolUse` block this result answers.
        tool_use_id: String,
        /// Result payload (string or nested content blocks).
        content: serde_json::Value,
        /// Whether the invocation failed.
        #[serde(default)]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Create a text block
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &serde_json::Value)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn new(role: Role, content: Vec<ContentBlock>) -> Self {
        Self { role, content }
    }

    /// A user message holding a single text block
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// An assistant message holding a single text block
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Concatenate all text blocks in this message.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }
}
