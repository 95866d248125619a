//! Secret file storage (API key, custom system prompt)

use opdeck_application::{SecretStore, SecretStoreError};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const API_KEY_FILE: &str = "api_key";
const SYSTEM_PROMPT_FILE: &str = "system_prompt";

/// [`SecretStore`] backed by raw text files in the opdeck config directory.
///
/// Files are written with mode 0600 on Unix. A missing or unreadable file
/// reads as `None` so the caller can fall back to an environment variable
/// or a default.
pub struct FileSecretStore {
    dir: PathBuf,
}

impl FileSecretStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn load(&self, name: &str) -> Option<String> {
        let path = self.dir.join(name);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(data) => Some(data.trim().to_string()),
            Err(e) => {
                debug!("Failed to read secret file {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&self, name: &str, data: &str) -> Result<(), SecretStoreError> {
        let wrap = |source: std::io::Error| SecretStoreError {
            name: name.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(wrap)?;

        let path = self.dir.join(name);
        fs::write(&path, data).map_err(wrap)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).map_err(wrap)?;
        }

        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn load_api_key(&self) -> Option<String> {
        self.load(API_KEY_FILE)
    }

    fn load_system_prompt(&self) -> Option<String> {
        self.load(SYSTEM_PROMPT_FILE)
    }

    fn save_api_key(&self, key: &str) -> Result<(), SecretStoreError> {
        self.save(API_KEY_FILE, key)
    }

    fn save_system_prompt(&self, prompt: &str) -> Result<(), SecretStoreError> {
        self.save(SYSTEM_PROMPT_FILE, prompt)
    }
}
