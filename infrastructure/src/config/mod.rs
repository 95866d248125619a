//! Configuration loading and secret storage for opdeck
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `OPDECK_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./opdeck.toml` or `./.opdeck.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/opdeck/config.toml`
//! 5. Fallback: `~/.config/opdeck/config.toml`
//! 6. Default values
//!
//! It also owns the file-backed secret store (`api_key` / `system_prompt`)
//! and the resolution of platform directories into concrete paths.

mod file_config;
mod loader;
mod paths;
mod secret_store;

pub use file_config::{
    FileConfig, FileEngineConfig, FileLoggingConfig, FileReplConfig, FileSessionConfig,
};
pub use loader::ConfigLoader;
pub use paths::AppPaths;
pub use secret_store::FileSecretStore;

use thiserror::Error;

/// Error loading the merged configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}
