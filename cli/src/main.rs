//! CLI entrypoint for opdeck
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use opdeck_application::{EnvironmentProbe, SecretStore, TurnSettings, validate_auth};
use opdeck_domain::Provider;
use opdeck_infrastructure::{
    AppPaths, ConfigError, ConfigLoader, FileConfig, FileSecretStore, JsonlTranscriptLogger,
    ProcessAgentLoop, SystemEnvironment,
};
use opdeck_presentation::{Cli, SessionRepl};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(ConfigError::Load)?
    };
    let paths = AppPaths::resolve(&config);

    info!("Starting opdeck");

    // === Dependency Injection ===
    let secrets = Arc::new(FileSecretStore::new(paths.config_dir().to_path_buf()));

    let provider = resolve_provider(&config, &SystemEnvironment)?;
    let api_key = secrets
        .load_api_key()
        .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
        .unwrap_or_default();
    let system_prompt_suffix = secrets.load_system_prompt().unwrap_or_default();

    let settings = TurnSettings {
        model: config
            .session
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string()),
        provider,
        api_key,
        system_prompt_suffix,
        max_recent_images: config.session.max_recent_images,
        hide_images: config.session.hide_images,
    };

    // Validate credentials before anything is spawned
    if let Err(error) = validate_auth(provider, &settings.api_key, &SystemEnvironment) {
        eprintln!("\nError: {error}");
        std::process::exit(1);
    }

    // The transcript is part of the session contract, so failing to create
    // it is fatal rather than a degraded start
    let logger = Arc::new(
        JsonlTranscriptLogger::new(paths.log_dir())
            .context("Failed to create the session transcript")?,
    );
    info!("Transcript: {}", logger.path().display());

    let engine_command = cli.engine.as_deref().unwrap_or(&config.engine.command);
    let engine = Arc::new(
        ProcessAgentLoop::spawn(engine_command, &config.engine.args)
            .with_context(|| format!("Failed to start sampling engine '{engine_command}'"))?,
    );

    let transcript_path = logger.path().to_path_buf();
    let mut repl = SessionRepl::new(
        engine,
        logger,
        secrets,
        settings,
        paths.history_file().to_path_buf(),
        transcript_path,
    )
    .with_quiet(cli.quiet);

    repl.run().await?;

    Ok(())
}

/// Select the API provider: `API_PROVIDER` beats the settings file, and the
/// absence of both means anthropic. A set-but-empty variable reads as
/// unset; an unknown value is a startup error, never a silent fallback.
fn resolve_provider(config: &FileConfig, probe: &dyn EnvironmentProbe) -> Result<Provider> {
    match probe.env_var("API_PROVIDER") {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid API_PROVIDER '{value}'")),
        None => Ok(config.session.provider.unwrap_or_default()),
    }
}
