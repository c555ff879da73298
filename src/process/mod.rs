//! Process adapter
//!
//! Implements the [`ProcessRunner`](crate::ports::ProcessRunner) port
//! with child processes on the local machine.

mod local;

pub use local::LocalProcessRunner;
