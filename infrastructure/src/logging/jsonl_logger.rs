//! JSONL file writer for session transcript entries.
//!
//! Each [`LogEntry`] is serialized as a single JSON line with `timestamp`,
//! `type`, `content`, and `metadata` fields and appended to the session file.

use chrono::Local;
use opdeck_application::{LogEntry, TranscriptError, TranscriptLogger};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Metadata captured when a logging session starts.
///
/// Held in memory for the lifetime of the logger and exposed via
/// [`JsonlTranscriptLogger::session_metadata`]; never written to the
/// transcript file itself.
#[derive(Debug, Clone)]
pub struct SessionMetadata {
    /// Session start time, ISO-8601 with microseconds.
    pub start_time: String,
    /// Host platform identifier.
    pub platform: &'static str,
    /// Timestamp-derived session identifier.
    pub session_id: String,
}

/// JSONL transcript logger that appends one JSON object per line.
///
/// One instance corresponds to one session file named
/// `interaction_log_<YYYYMMDD_HHMMSS>.jsonl`. Every append opens the file,
/// writes a single line, and closes it. Lines are never rewritten or
/// deleted, and the logger never reads the file back.
pub struct JsonlTranscriptLogger {
    path: PathBuf,
    metadata: SessionMetadata,
}

impl JsonlTranscriptLogger {
    /// Create a logger writing to a fresh timestamped file under `log_dir`.
    ///
    /// Creates the directory if it does not exist. Fails with
    /// [`TranscriptError::CreateDir`] when the directory cannot be created.
    pub fn new(log_dir: &Path) -> Result<Self, TranscriptError> {
        std::fs::create_dir_all(log_dir).map_err(|source| TranscriptError::CreateDir {
            path: log_dir.to_path_buf(),
            source,
        })?;

        let now = Local::now();
        let filename = format!("interaction_log_{}.jsonl", now.format("%Y%m%d_%H%M%S"));
        let metadata = SessionMetadata {
            start_time: now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
            platform: std::env::consts::OS,
            session_id: now.format("%Y%m%d_%H%M%S_%6f").to_string(),
        };

        Ok(Self {
            path: log_dir.join(filename),
            metadata,
        })
    }

    /// Get the path to the session transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Metadata captured at construction.
    pub fn session_metadata(&self) -> &SessionMetadata {
        &self.metadata
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn append(&self, entry: LogEntry) -> Result<(), TranscriptError> {
        let line = serde_json::to_string(&entry.to_value()?)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| TranscriptError::Write {
                path: self.path.clone(),
                source,
            })?;

        writeln!(file, "{}", line).map_err(|source| TranscriptError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
