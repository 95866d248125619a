//! Turn presenter - renders engine callbacks to the terminal and transcript
//!
//! All println!/colored output for an in-flight turn is concentrated here,
//! separating display from the turn orchestration in the application layer.

use crate::ConsoleFormatter;
use colored::Colorize;
use opdeck_application::{TranscriptError, TranscriptLogger, TurnObserver};
use opdeck_domain::{ApiError, ContentBlock, ModelResponse, ToolResult};
use std::sync::Arc;
use tracing::warn;

/// Renders engine progress callbacks for one turn.
///
/// Each callback both prints to the terminal and appends to the session
/// transcript. A transcript write failure is reported on stderr and via
/// `tracing::warn!` but never interrupts the turn in flight.
pub struct SessionPresenter {
    logger: Arc<dyn TranscriptLogger>,
    hide_images: bool,
}

impl SessionPresenter {
    pub fn new(logger: Arc<dyn TranscriptLogger>, hide_images: bool) -> Self {
        Self {
            logger,
            hide_images,
        }
    }

    fn report_log_failure(&self, err: &TranscriptError) {
        eprintln!("{} {}", "Transcript write failed:".red().bold(), err);
        warn!("Transcript write failed: {}", err);
    }
}

impl TurnObserver for SessionPresenter {
    fn on_assistant_block(&self, block: &ContentBlock) {
        match block {
            ContentBlock::Text { text } => {
                println!("{}", ConsoleFormatter::format_assistant_text(text));
                if let Err(e) = self.logger.log_assistant_response(block) {
                    self.report_log_failure(&e);
                }
            }
            ContentBlock::ToolUse { id, name, input } => {
                println!("{}", ConsoleFormatter::format_tool_use(name, input));
                if let Err(e) = self.logger.log_tool_use(name, input, id) {
                    self.report_log_failure(&e);
                }
            }
            ContentBlock::ToolResult { .. } => {}
        }
    }

    fn on_tool_output(&self, result: &ToolResult, tool_id: &str) {
        print!(
            "{}",
            ConsoleFormatter::format_tool_output(result, self.hide_images)
        );
        if let Err(e) = self.logger.log_tool_result(result, tool_id) {
            self.report_log_failure(&e);
        }
    }

    fn on_api_exchange(
        &self,
        request: &serde_json::Value,
        response: Option<&ModelResponse>,
        error: Option<&ApiError>,
    ) {
        if let Err(e) = self.logger.log_api_interaction(request, response, error) {
            self.report_log_failure(&e);
        }
        if let Some(error) = error {
            println!("{}", ConsoleFormatter::format_api_error(error));
        }
    }
}
