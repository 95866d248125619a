//! Process environment adapter for credential probing.

use opdeck_application::EnvironmentProbe;
use std::path::{Path, PathBuf};

/// [`EnvironmentProbe`] backed by the real process environment.
pub struct SystemEnvironment;

impl EnvironmentProbe for SystemEnvironment {
    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|value| !value.is_empty())
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_var_returns_none() {
        let probe = SystemEnvironment;
        assert!(probe.env_var("OPDECK_SURELY_UNSET_VARIABLE").is_none());
    }

    #[test]
    fn test_empty_env_var_reads_as_unset() {
        // No other test reads or writes this variable
        unsafe { std::env::set_var("ENV_PROBE_EMPTY_VALUE", "") };
        assert!(SystemEnvironment.env_var("ENV_PROBE_EMPTY_VALUE").is_none());
        unsafe { std::env::remove_var("ENV_PROBE_EMPTY_VALUE") };
    }

    #[test]
    fn test_file_exists_checks_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let probe = SystemEnvironment;
        assert!(probe.file_exists(dir.path()));
        assert!(!probe.file_exists(&dir.path().join("missing")));
    }
}
