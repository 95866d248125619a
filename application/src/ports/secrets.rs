//! Port for persisting session secrets (API key, custom system prompt).

use thiserror::Error;

/// Error persisting a secret value.
#[derive(Error, Debug)]
#[error("Error saving {name}: {source}")]
pub struct SecretStoreError {
    /// Which secret failed to persist (`api_key` or `system_prompt`).
    pub name: String,
    #[source]
    pub source: std::io::Error,
}

/// Persistent storage for the small secrets the session driver manages.
///
/// Loads are forgiving (`None` when nothing is stored) so callers can fall
/// back to environment variables or defaults. Saves return an explicit
/// result; the caller decides how to report a failure.
pub trait SecretStore: Send + Sync {
    /// Load the stored API key. `None` if nothing is stored.
    fn load_api_key(&self) -> Option<String>;

    /// Load the stored custom system prompt. `None` if nothing is stored.
    fn load_system_prompt(&self) -> Option<String>;

    /// Persist the API key.
    fn save_api_key(&self, key: &str) -> Result<(), SecretStoreError>;

    /// Persist the custom system prompt. An empty string is a valid value
    /// (it clears the prompt on the next load).
    fn save_system_prompt(&self, prompt: &str) -> Result<(), SecretStoreError>;
}

/// No-op secret store that remembers nothing.
pub struct NoSecretStore;

impl SecretStore for NoSecretStore {
    fn load_api_key(&self) -> Option<String> {
        None
    }

    fn load_system_prompt(&self) -> Option<String> {
        None
    }

    fn save_api_key(&self, _key: &str) -> Result<(), SecretStoreError> {
        Ok(())
    }

    fn save_system_prompt(&self, _prompt: &str) -> Result<(), SecretStoreError> {
        Ok(())
    }
}
