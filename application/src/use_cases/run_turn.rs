//! Run Turn use case.
//!
//! Executes one conversational turn: record the user's message, hand the
//! full history to the agent loop, and adopt the history it returns.

use crate::ports::agent_loop::{AgentLoop, EngineError, TurnRequest};
use crate::ports::observer::TurnObserver;
use crate::ports::transcript::{TranscriptError, TranscriptLogger};
use opdeck_domain::core::provider::Provider;
use opdeck_domain::session::entities::Message;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while running a turn.
#[derive(Error, Debug)]
pub enum RunTurnError {
    /// The user's message could not be recorded; the engine was never invoked.
    #[error("Transcript write failed: {0}")]
    Transcript(#[from] TranscriptError),

    /// The engine failed mid-turn. The user's message stays in the history.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Per-turn settings, resolved from configuration and `:config` edits.
#[derive(Debug, Clone)]
pub struct TurnSettings {
    pub provider: Provider,
    pub model: String,
    pub api_key: String,
    pub system_prompt_suffix: String,
    pub max_recent_images: usize,
    /// Display-only: suppresses screenshot placeholders in terminal output.
    /// Never forwarded to the engine.
    pub hide_images: bool,
}

impl Default for TurnSettings {
    fn default() -> Self {
        let provider = Provider::default();
        Self {
            model: provider.default_model().to_string(),
            provider,
            api_key: String::new(),
            system_prompt_suffix: String::new(),
            max_recent_images: 10,
            hide_images: false,
        }
    }
}

/// Use case for running one conversational turn through the agent loop.
///
/// Flow:
/// 1. Append the user message to the caller's history
/// 2. Record it in the transcript; failure aborts before the engine runs
/// 3. Drive the engine with the full history and the observer
/// 4. On success, adopt the returned history wholesale
/// 5. On failure, record an `error` entry and leave the history as it is;
///    the unanswered user turn is kept, not rolled back
pub struct RunTurnUseCase<L: AgentLoop> {
    engine: Arc<L>,
    logger: Arc<dyn TranscriptLogger>,
}

impl<L: AgentLoop> RunTurnUseCase<L> {
    pub fn new(engine: Arc<L>, logger: Arc<dyn TranscriptLogger>) -> Self {
        Self { engine, logger }
    }

    /// Execute one turn, mutating `history` in place.
    pub async fn execute(
        &self,
        text: &str,
        history: &mut Vec<Message>,
        settings: &TurnSettings,
        observer: &dyn TurnObserver,
    ) -> Result<(), RunTurnError> {
        let message = Message::user_text(text);
        history.push(message.clone());
        self.logger.log_user_input(&message)?;

        let request = TurnRequest {
            system_prompt_suffix: settings.system_prompt_suffix.clone(),
            model: settings.model.clone(),
            provider: settings.provider,
            messages: history.clone(),
            api_key: settings.api_key.clone(),
            max_recent_images: settings.max_recent_images,
        };

        debug!(
            "Running turn with {} via {} ({} messages)",
            settings.model,
            settings.provider,
            history.len()
        );

        match self.engine.run_turn(request, observer).await {
            Ok(messages) => {
                *history = messages;
                Ok(())
            }
            Err(err) => {
                // Best effort; the engine failure is the error that matters here
                if let Err(log_err) = self.logger.log_error(err.kind(), &err.to_string()) {
                    warn!("Could not record engine failure in transcript: {}", log_err);
                }
                Err(RunTurnError::Engine(err))
            }
        }
    }
}
