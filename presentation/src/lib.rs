//! Presentation layer for opdeck
//!
//! This crate contains CLI definitions, console output formatting,
//! the turn presenter, and the interactive session REPL.

pub mod cli;
pub mod output;
pub mod presenter;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleFormatter;
pub use presenter::SessionPresenter;
pub use repl::{CommandOutcome, ReplCommand, SessionRepl};
