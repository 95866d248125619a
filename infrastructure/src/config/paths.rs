//! Filesystem locations for secrets, transcripts, and REPL history

use super::file_config::FileConfig;
use std::path::{Path, PathBuf};

/// Resolved filesystem locations for one run of the application.
///
/// All platform-directory decisions happen here, once, at startup.
/// Constructors downstream receive concrete paths instead of consulting
/// `dirs` themselves.
#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    log_dir: PathBuf,
    history_file: PathBuf,
}

impl AppPaths {
    /// Resolve paths from platform directories plus file config overrides.
    ///
    /// - Secrets: `<config_dir>/opdeck`
    /// - Transcripts: `[logging] dir` override, else `<data_dir>/opdeck/logs`
    /// - History: `[repl] history_file` override, else `<data_dir>/opdeck/history.txt`
    pub fn resolve(config: &FileConfig) -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opdeck");
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("opdeck");

        let log_dir = match &config.logging.dir {
            Some(dir) => PathBuf::from(dir),
            None => data_dir.join("logs"),
        };
        let history_file = match &config.repl.history_file {
            Some(path) => PathBuf::from(path),
            None => data_dir.join("history.txt"),
        };

        Self {
            config_dir,
            log_dir,
            history_file,
        }
    }

    /// Directory holding the secret files (`api_key`, `system_prompt`).
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory where session transcript files are created.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the REPL history file.
    pub fn history_file(&self) -> &Path {
        &self.history_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let paths = AppPaths::resolve(&FileConfig::default());
        assert!(paths.config_dir().to_string_lossy().contains("opdeck"));
        assert!(paths.log_dir().ends_with("logs"));
        assert!(paths.history_file().ends_with("history.txt"));
    }

    #[test]
    fn test_resolve_honors_overrides() {
        let mut config = FileConfig::default();
        config.logging.dir = Some("/tmp/opdeck-test-logs".to_string());
        config.repl.history_file = Some("/tmp/opdeck-history".to_string());

        let paths = AppPaths::resolve(&config);
        assert_eq!(paths.log_dir(), Path::new("/tmp/opdeck-test-logs"));
        assert_eq!(paths.history_file(), Path::new("/tmp/opdeck-history"));
    }
}
