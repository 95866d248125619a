//! Credential validation.
//!
//! Checks that the selected provider has usable credentials *locally*
//! (environment variables and credential files). Nothing here talks to a
//! cloud service; a key that exists but was revoked passes validation and
//! fails later, inside the engine.

use crate::ports::environment::EnvironmentProbe;
use opdeck_domain::core::provider::Provider;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A provider's credentials are missing or incomplete.
///
/// Fatal at startup: the driver prints the diagnostic and exits without
/// ever entering the prompt loop.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Enter your Anthropic API key to continue.")]
    MissingAnthropicKey,

    #[error("You must have AWS credentials set up to use the Bedrock API.")]
    MissingAwsCredentials,

    #[error("Set the CLOUD_ML_REGION environment variable to use the Vertex API.")]
    MissingVertexRegion,

    #[error("Your google cloud credentials are not set up correctly.")]
    MissingGoogleCredentials,
}

/// Validate that `provider` can plausibly authenticate.
///
/// - `anthropic`: a non-empty API key
/// - `bedrock`: an AWS key pair in the environment, or a shared
///   credentials file
/// - `vertex`: `CLOUD_ML_REGION` set, plus discoverable
///   application-default credentials
pub fn validate_auth(
    provider: Provider,
    api_key: &str,
    probe: &dyn EnvironmentProbe,
) -> Result<(), AuthError> {
    match provider {
        Provider::Anthropic => {
            if api_key.is_empty() {
                return Err(AuthError::MissingAnthropicKey);
            }
        }
        Provider::Bedrock => {
            let has_env_pair = probe.env_var("AWS_ACCESS_KEY_ID").is_some()
                && probe.env_var("AWS_SECRET_ACCESS_KEY").is_some();
            let has_credentials_file =
                aws_credentials_file(probe).is_some_and(|path| probe.file_exists(&path));
            if !has_env_pair && !has_credentials_file {
                return Err(AuthError::MissingAwsCredentials);
            }
        }
        Provider::Vertex => {
            if probe.env_var("CLOUD_ML_REGION").is_none() {
                return Err(AuthError::MissingVertexRegion);
            }
            if !google_credentials_discoverable(probe) {
                return Err(AuthError::MissingGoogleCredentials);
            }
        }
    }
    Ok(())
}

fn aws_credentials_file(probe: &dyn EnvironmentProbe) -> Option<PathBuf> {
    if let Some(path) = probe.env_var("AWS_SHARED_CREDENTIALS_FILE") {
        return Some(PathBuf::from(path));
    }
    probe
        .home_dir()
        .map(|home| home.join(".aws").join("credentials"))
}

fn google_credentials_discoverable(probe: &dyn EnvironmentProbe) -> bool {
    if let Some(path) = probe.env_var("GOOGLE_APPLICATION_CREDENTIALS") {
        return probe.file_exists(Path::new(&path));
    }
    // The gcloud CLI's well-known application-default credentials location
    probe
        .home_dir()
        .map(|home| {
            home.join(".config")
                .join("gcloud")
                .join("application_default_credentials.json")
        })
        .is_some_and(|path| probe.file_exists(&path))
}
