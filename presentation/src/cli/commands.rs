//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for opdeck
#[derive(Parser, Debug)]
#[command(name = "opdeck")]
#[command(author, version, about = "Interactive computer use session driver")]
#[command(long_about = r#"
opdeck drives an interactive computer use session from the terminal.

Prompts are handed to an external sampling engine that queries the model and
executes the tools it requests; every step of the exchange is appended to a
JSONL transcript file. Inside the session, `:`-prefixed commands manage
configuration and history (type :help at the prompt).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./opdeck.toml       Project-level config
3. ~/.config/opdeck/config.toml   Global config

Example:
  opdeck
  opdeck --engine ./sampling-engine.py
  opdeck -vv --config ./demo.toml
"#)]
pub struct Cli {
    /// Engine command override (takes precedence over [engine] config)
    #[arg(long, value_name = "CMD")]
    pub engine: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the welcome banner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
