//! ffuf Use Case
//!
//! Builds the ffuf argument vector, runs it through the process port and
//! maps the termination status to a success text or an error.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::config::Config;
use crate::error::{BridgeError, Result};
use crate::ports::{ProcessExit, ProcessRunner, SpawnOptions};

/// Flag ffuf uses for the target URL
pub const TARGET_URL_FLAG: &str = "-u";

/// Appended to the captured output of every successful run
pub const COMPLETION_MARKER: &str = "\n ffuf completed successfully";

/// One request to run ffuf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzJob {
    pub url: String,
    pub args: Vec<String>,
}

impl FuzzJob {
    /// Create a job after checking that `url` is an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::InvalidUrl` if `url` does not parse.
    pub fn new(url: impl Into<String>, args: Vec<String>) -> Result<Self> {
        let url = url.into();
        validate_target_url(&url)?;
        Ok(Self { url, args })
    }
}

/// Check that `url` parses as an absolute URL.
///
/// Only the result is used. ffuf receives `url` exactly as given, so
/// keywords like `FUZZ` are never touched by normalization.
///
/// # Errors
///
/// Returns `BridgeError::InvalidUrl` with the parser's reason.
pub fn validate_target_url(url: &str) -> Result<()> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|e| BridgeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })
}

/// Builder for ffuf argument vectors
pub struct FfufCommandBuilder;

impl FfufCommandBuilder {
    /// Build `["-u", url, args...]`, preserving the order of `args`.
    #[must_use]
    pub fn build_args(url: &str, args: &[String]) -> Vec<String> {
        let mut argv = Vec::with_capacity(args.len() + 2);
        argv.push(TARGET_URL_FLAG.to_string());
        argv.push(url.to_string());
        argv.extend(args.iter().cloned());
        argv
    }

    /// Text returned for a run that exited with status 0
    #[must_use]
    pub fn format_success(output: &str) -> String {
        let mut text = String::with_capacity(output.len() + COMPLETION_MARKER.len());
        text.push_str(output);
        text.push_str(COMPLETION_MARKER);
        text
    }
}

/// Use case for running one fuzz job to completion
///
/// No timeout and no cancellation: the returned future resolves only when
/// ffuf exits or fails to start.
pub struct RunFuzzJobUseCase {
    runner: Arc<dyn ProcessRunner>,
    binary: PathBuf,
    options: SpawnOptions,
    include_output_on_failure: bool,
}

impl RunFuzzJobUseCase {
    pub fn new(runner: Arc<dyn ProcessRunner>, config: &Config) -> Self {
        Self {
            runner,
            binary: config.binary.clone(),
            options: SpawnOptions::from(&config.ffuf),
            include_output_on_failure: config.output.include_output_on_failure,
        }
    }

    /// Run `job` and return the captured output followed by the completion marker.
    ///
    /// # Errors
    ///
    /// - `BridgeError::LaunchFailed` if ffuf could not be started
    /// - `BridgeError::ProcessExit` if ffuf exited with a nonzero code
    /// - `BridgeError::ProcessSignaled` if ffuf was killed by a signal
    pub async fn run(&self, job: &FuzzJob) -> Result<String> {
        let argv = FfufCommandBuilder::build_args(&job.url, &job.args);

        info!(
            binary = %self.binary.display(),
            url = %job.url,
            extra_args = job.args.len(),
            "Starting fuzz job"
        );

        let finished = self.runner.run(&self.binary, &argv, &self.options).await?;

        let failure_output = || {
            self.include_output_on_failure
                .then(|| finished.output.clone())
        };

        match finished.exit {
            ProcessExit::Code(0) => {
                info!(url = %job.url, duration_ms = finished.duration_ms, "Fuzz job completed");
                Ok(FfufCommandBuilder::format_success(&finished.output))
            }
            ProcessExit::Code(code) => {
                warn!(url = %job.url, code, "ffuf exited with nonzero status");
                Err(BridgeError::ProcessExit {
                    code,
                    output: failure_output(),
                })
            }
            ProcessExit::Signal(signal) => {
                warn!(url = %job.url, ?signal, "ffuf terminated by signal");
                Err(BridgeError::ProcessSignaled {
                    signal,
                    output: failure_output(),
                })
            }
        }
    }
}
