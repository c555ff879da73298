//! CLI runner functions
//!
//! These reuse the same use case the `do-ffuf` tool runs, so a job started
//! from the command line behaves exactly like one started over MCP.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::domain::{FuzzJob, RunFuzzJobUseCase};
use crate::error::Result;
use crate::ports::ProcessRunner;
use crate::process::LocalProcessRunner;

/// Run one fuzz job with `runner` and return the success text.
///
/// # Errors
///
/// Returns an error if `url` is invalid, ffuf cannot be started, or it
/// terminates unsuccessfully.
pub async fn fuzz_once(
    runner: Arc<dyn ProcessRunner>,
    config: &Config,
    url: &str,
    args: Vec<String>,
) -> Result<String> {
    let job = FuzzJob::new(url, args)?;
    RunFuzzJobUseCase::new(runner, config).run(&job).await
}

/// Run one fuzz job on the local machine and print its output to stdout
///
/// # Errors
///
/// Returns an error if:
/// - The URL does not parse
/// - ffuf cannot be started
/// - ffuf exits with a nonzero code or is killed by a signal
/// - Writing to stdout fails
pub async fn run_fuzz(config: Arc<Config>, url: &str, args: Vec<String>) -> Result<()> {
    info!(url = %url, "Running single fuzz job");

    let text = fuzz_once(Arc::new(LocalProcessRunner::new()), &config, url, args).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{text}")?;
    stdout.flush()?;

    Ok(())
}
