//! Sampling engine bridge.
//!
//! The agent loop itself (model calls, tool execution) lives in an external
//! engine process. This module owns that child process and the
//! newline-delimited JSON protocol spoken over its stdio.

mod process;
mod protocol;

pub use process::ProcessAgentLoop;
pub use protocol::{EngineEvent, encode_turn, parse_event};
