//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use opdeck_domain::Provider;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session defaults (provider, model, image retention)
    pub session: FileSessionConfig,
    /// Sampling engine child process settings
    pub engine: FileEngineConfig,
    /// Transcript logging settings
    pub logging: FileLoggingConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

/// Raw `[session]` configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSessionConfig {
    /// API provider (`anthropic`, `bedrock`, or `vertex`)
    pub provider: Option<Provider>,
    /// Model name override (falls back to the provider's default model)
    pub model: Option<String>,
    /// Number of most recent screenshots kept in the conversation
    pub max_recent_images: usize,
    /// Suppress screenshot placeholders in terminal output
    pub hide_images: bool,
}

impl Default for FileSessionConfig {
    fn default() -> Self {
        Self {
            provider: None,
            model: None,
            max_recent_images: 10,
            hide_images: false,
        }
    }
}

/// Raw `[engine]` configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEngineConfig {
    /// Command used to spawn the sampling engine
    pub command: String,
    /// Extra arguments passed to the engine command
    pub args: Vec<String>,
}

impl Default for FileEngineConfig {
    fn default() -> Self {
        Self {
            command: "opdeck-engine".to_string(),
            args: Vec::new(),
        }
    }
}

/// Raw `[logging]` configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for session transcript files
    pub dir: Option<String>,
}

/// Raw `[repl]` configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Path to history file
    pub history_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[session]
provider = "bedrock"
model = "anthropic.claude-3-5-sonnet-20241022-v2:0"
max_recent_images = 4
hide_images = true

[engine]
command = "./engine.py"
args = ["--verbose"]

[logging]
dir = "/tmp/opdeck-logs"

[repl]
history_file = "~/.local/share/opdeck/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.provider, Some(Provider::Bedrock));
        assert_eq!(
            config.session.model.as_deref(),
            Some("anthropic.claude-3-5-sonnet-20241022-v2:0")
        );
        assert_eq!(config.session.max_recent_images, 4);
        assert!(config.session.hide_images);
        assert_eq!(config.engine.command, "./engine.py");
        assert_eq!(config.engine.args, vec!["--verbose"]);
        assert_eq!(config.logging.dir.as_deref(), Some("/tmp/opdeck-logs"));
        assert!(config.repl.history_file.is_some());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
provider = "vertex"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.provider, Some(Provider::Vertex));
        // Defaults should apply
        assert!(config.session.model.is_none());
        assert_eq!(config.session.max_recent_images, 10);
        assert_eq!(config.engine.command, "opdeck-engine");
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert!(config.session.provider.is_none());
        assert!(config.session.model.is_none());
        assert_eq!(config.session.max_recent_images, 10);
        assert!(!config.session.hide_images);
        assert!(config.engine.args.is_empty());
        assert!(config.logging.dir.is_none());
        assert!(config.repl.history_file.is_none());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let toml_str = r#"
[session]
provider = "openai"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
