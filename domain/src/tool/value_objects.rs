//! Tool domain value objects: the immutable result type

use serde::{Deserialize, Serialize};

/// Result of a single tool invocation, as reported by the agent engine.
///
/// All fields are optional; any combination may be present. A screenshot
/// travels as base64 in [`base64_image`](Self::base64_image); display and
/// transcript layers must never print the raw payload (the transcript
/// records only a presence flag, the terminal prints a placeholder).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolResult {
    /// Text output of the tool (stdout, editor feedback, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Error text (stderr, failure description)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Base64-encoded screenshot payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
    /// System note for the model (e.g. resolution scaling info)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl ToolResult {
    /// Create a result carrying text output
    pub fn from_output(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            ..Self::default()
        }
    }

    /// Create a result carrying an error
    pub fn from_error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Attach a base64-encoded screenshot
    pub fn with_image(mut self, base64_image: impl Into<String>) -> Self {
        self.base64_image = Some(base64_image.into());
        self
    }

    /// Attach a system note
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Check if the result carries a screenshot
    pub fn has_image(&self) -> bool {
        self.base64_image.is_some()
    }

    /// Check if the result carries an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
