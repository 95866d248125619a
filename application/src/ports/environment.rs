//! Environment probe port.
//!
//! Credential validation only checks what is locally present (environment
//! variables and credential files), never a cloud round-trip. This port
//! abstracts those probes so the validation logic stays pure and testable.

use std::path::{Path, PathBuf};

/// Read-only view of the local environment.
pub trait EnvironmentProbe: Send + Sync {
    /// Look up an environment variable, `None` when unset or empty.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Check whether a file exists.
    fn file_exists(&self, path: &Path) -> bool;

    /// The user's home directory, if resolvable.
    fn home_dir(&self) -> Option<PathBuf>;
}
