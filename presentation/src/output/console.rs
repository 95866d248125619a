//! Console output formatter for session events

use colored::Colorize;
use opdeck_domain::{ApiError, ToolResult};

/// Formats session events for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format an assistant text block.
    pub fn format_assistant_text(text: &str) -> String {
        format!("\n{} {}", "Assistant:".cyan().bold(), text)
    }

    /// Format a tool invocation announcement.
    pub fn format_tool_use(name: &str, input: &serde_json::Value) -> String {
        format!(
            "\n{} {}\n{} {}",
            "Tool Use:".yellow().bold(),
            name,
            "Input:".yellow().bold(),
            input
        )
    }

    /// Format a tool result block.
    ///
    /// Image payloads are reduced to a `[Screenshot captured]` placeholder,
    /// suppressed entirely when `hide_images` is set. Raw image bytes never
    /// reach the terminal.
    pub fn format_tool_output(result: &ToolResult, hide_images: bool) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", "Tool Output:".yellow().bold()));
        if let Some(text) = &result.output
            && !text.is_empty()
        {
            output.push_str(text);
            output.push('\n');
        }
        if let Some(error) = &result.error
            && !error.is_empty()
        {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }
        if result.has_image() && !hide_images {
            output.push_str("[Screenshot captured]\n");
        }
        output
    }

    /// Format an API failure line.
    pub fn format_api_error(error: &ApiError) -> String {
        format!("\n{} {}", "API Error:".red().bold(), error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_text() {
        let out = ConsoleFormatter::format_assistant_text("I took the screenshot.");
        assert!(out.contains("Assistant:"));
        assert!(out.contains("I took the screenshot."));
    }

    #[test]
    fn test_tool_use_shows_name_and_input() {
        let out =
            ConsoleFormatter::format_tool_use("computer", &serde_json::json!({"action": "key"}));
        assert!(out.contains("Tool Use:"));
        assert!(out.contains("computer"));
        assert!(out.contains(r#""action":"key""#));
    }

    #[test]
    fn test_tool_output_with_error() {
        let result = ToolResult::from_error("command not found");
        let out = ConsoleFormatter::format_tool_output(&result, false);
        assert!(out.contains("Tool Output:"));
        assert!(out.contains("command not found"));
        assert!(!out.contains("[Screenshot captured]"));
    }

    #[test]
    fn test_screenshot_placeholder_replaces_payload() {
        let result = ToolResult::from_output("ok").with_image("aGVsbG8=");
        let out = ConsoleFormatter::format_tool_output(&result, false);
        assert!(out.contains("[Screenshot captured]"));
        assert!(!out.contains("aGVsbG8="));
    }

    #[test]
    fn test_hide_images_suppresses_placeholder() {
        let result = ToolResult::from_output("ok").with_image("aGVsbG8=");
        let out = ConsoleFormatter::format_tool_output(&result, true);
        assert!(!out.contains("[Screenshot captured]"));
        assert!(out.contains("ok"));
    }

    #[test]
    fn test_api_error_with_and_without_status() {
        let with_status = ConsoleFormatter::format_api_error(&ApiError::status(529, "overloaded"));
        assert!(with_status.contains("API Error:"));
        assert!(with_status.contains("529 - overloaded"));

        let without = ConsoleFormatter::format_api_error(&ApiError::other("connection refused"));
        assert!(without.contains("connection refused"));
        assert!(!without.contains(" - "));
    }
}
