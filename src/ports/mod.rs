//! Ports module - Trait definitions for hexagonal architecture
//!
//! This module contains the trait definitions (ports) that define
//! the boundaries between the domain logic and external adapters.

pub mod process;
pub mod protocol;
mod tools;

pub use process::{ProcessExit, ProcessOutput, ProcessRunner, SpawnOptions};
pub use protocol::{ToolAnnotations, ToolCallResult, ToolContent};
pub use tools::{ToolContext, ToolHandler, ToolSchema};

#[cfg(test)]
pub use process::mock::MockProcessRunner;

#[cfg(test)]
pub use tools::mock;
