//! Infrastructure layer for opdeck
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the JSONL transcript logger, the sampling
//! engine child process bridge, configuration file loading, secret
//! storage, and the process environment probe.

pub mod config;
pub mod engine;
pub mod environment;
pub mod logging;

// Re-export commonly used types
pub use config::{
    AppPaths, ConfigError, ConfigLoader, FileConfig, FileEngineConfig, FileLoggingConfig,
    FileReplConfig, FileSecretStore, FileSessionConfig,
};
pub use engine::ProcessAgentLoop;
pub use environment::SystemEnvironment;
pub use logging::{JsonlTranscriptLogger, SessionMetadata};
