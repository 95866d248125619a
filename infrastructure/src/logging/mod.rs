//! Logging infrastructure for session transcripts.
//!
//! Provides [`JsonlTranscriptLogger`], a JSONL file writer that implements
//! the [`TranscriptLogger`](opdeck_application::TranscriptLogger) port.

mod jsonl_logger;

pub use jsonl_logger::{JsonlTranscriptLogger, SessionMetadata};
