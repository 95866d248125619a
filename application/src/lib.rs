//! Application layer for opdeck
//!
//! This crate contains use cases and port definitions for the session
//! driver. It depends only on the domain layer.
//!
//! # Ports
//!
//! - [`TranscriptLogger`]: append-only session transcript recording
//! - [`AgentLoop`]: the external sampling loop that runs one turn
//! - [`TurnObserver`]: callbacks the loop invokes as a turn progresses
//! - [`EnvironmentProbe`]: local credential presence checks
//! - [`SecretStore`]: persistence for the API key and custom system prompt
//!
//! # Use cases
//!
//! - [`RunTurnUseCase`]: one prompt through the engine, transcript included
//! - [`validate_auth`]: provider credential validation before the loop starts

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    agent_loop::{AgentLoop, EngineError, TurnRequest},
    environment::EnvironmentProbe,
    observer::{NoTurnObserver, TurnObserver},
    secrets::{NoSecretStore, SecretStore, SecretStoreError},
    transcript::{
        EntryType, LogContent, LogEntry, NoTranscriptLogger, TranscriptError, TranscriptLogger,
        whitelist_api_request,
    },
};
pub use use_cases::run_turn::{RunTurnError, RunTurnUseCase, TurnSettings};
pub use use_cases::validate_auth::{AuthError, validate_auth};
