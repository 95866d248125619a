//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod agent_loop;
pub mod environment;
pub mod observer;
pub mod secrets;
pub mod transcript;
