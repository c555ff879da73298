//! Process Runner Port
//!
//! This module defines the trait for launching an external program and
//! collecting its output, abstracting away the underlying process API.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::config::FfufConfig;
use crate::error::Result;

/// How a finished process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessExit {
    /// Exited normally with this status code
    Code(i32),
    /// Killed by a signal (Unix), signal number when known
    Signal(Option<i32>),
}

impl ProcessExit {
    /// Whether the process exited with status code 0
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self, Self::Code(0))
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit code {code}"),
            Self::Signal(Some(sig)) => write!(f, "signal {sig}"),
            Self::Signal(None) => f.write_str("unknown signal"),
        }
    }
}

/// Output from a finished process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// stdout and stderr chunks, interleaved in arrival order
    pub output: String,
    pub exit: ProcessExit,
    pub duration_ms: u64,
}

/// Options applied to every spawned process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnOptions {
    pub working_dir: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl From<&FfufConfig> for SpawnOptions {
    fn from(config: &FfufConfig) -> Self {
        Self {
            working_dir: config.working_dir.clone(),
            env: config.env.clone(),
        }
    }
}

/// Trait for running an external program to completion
///
/// Implementations must pass `args` as a discrete argument vector (no shell),
/// capture both output streams into one buffer, and resolve exactly once.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `program` with `args` and wait for it to terminate
    ///
    /// # Arguments
    /// * `program` - Path or name of the binary to launch
    /// * `args` - Argument vector, passed verbatim
    /// * `options` - Working directory and extra environment
    ///
    /// # Errors
    /// Returns `BridgeError::LaunchFailed` if the process cannot be started.
    /// A nonzero exit is not an error at this level.
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        options: &SpawnOptions,
    ) -> Result<ProcessOutput>;
}
