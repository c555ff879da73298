//! Local process runner
//!
//! Spawns the program with `tokio::process`, forwards chunks from both pipes
//! into a single channel and folds them into one buffer in arrival order.

use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{BridgeError, Result};
use crate::ports::{ProcessExit, ProcessOutput, ProcessRunner, SpawnOptions};

/// Read size for each pipe
const CHUNK_SIZE: usize = 8 * 1024;

/// Runs programs as child processes of the server
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalProcessRunner;

impl LocalProcessRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for LocalProcessRunner {
    async fn run(
        &self,
        program: &Path,
        args: &[String],
        options: &SpawnOptions,
    ) -> Result<ProcessOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .envs(&options.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &options.working_dir {
            cmd.current_dir(dir);
        }

        let start = Instant::now();
        let mut child = cmd.spawn().map_err(|e| {
            warn!(binary = %program.display(), error = %e, "Failed to spawn process");
            BridgeError::LaunchFailed {
                binary: program.display().to_string(),
                reason: e.to_string(),
            }
        })?;

        debug!(
            binary = %program.display(),
            pid = child.id(),
            argc = args.len(),
            "Process started"
        );

        let stdout = child.stdout.take().ok_or_else(|| pipe_unavailable("stdout"))?;
        let stderr = child.stderr.take().ok_or_else(|| pipe_unavailable("stderr"))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let stdout_task = forward_chunks(stdout, tx.clone());
        let stderr_task = forward_chunks(stderr, tx);

        let output = collect_chunks(rx).await;

        for (name, task) in [("stdout", stdout_task), ("stderr", stderr_task)] {
            match task.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(stream = name, error = %e, "Failed to read process output"),
                Err(e) => warn!(stream = name, error = %e, "Output reader task failed"),
            }
        }

        let status = child.wait().await?;
        let exit = exit_from_status(status);
        #[allow(clippy::cast_possible_truncation)]
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            binary = %program.display(),
            exit = %exit,
            duration_ms,
            output_bytes = output.len(),
            "Process finished"
        );

        Ok(ProcessOutput {
            output,
            exit,
            duration_ms,
        })
    }
}

/// Copy every chunk read from `reader` into `tx` until EOF.
fn forward_chunks<R>(mut reader: R, tx: mpsc::UnboundedSender<Vec<u8>>) -> JoinHandle<io::Result<()>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; CHUNK_SIZE];
        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 || tx.send(buf[..n].to_vec()).is_err() {
                return Ok(());
            }
        }
    })
}

/// Decode chunks in the order they were received until every sender is gone.
async fn collect_chunks(mut rx: mpsc::UnboundedReceiver<Vec<u8>>) -> String {
    let mut output = String::new();
    while let Some(chunk) = rx.recv().await {
        output.push_str(&String::from_utf8_lossy(&chunk));
    }
    output
}

fn pipe_unavailable(name: &str) -> BridgeError {
    BridgeError::Io(io::Error::other(format!("process {name} unavailable")))
}

#[cfg(unix)]
fn exit_from_status(status: ExitStatus) -> ProcessExit {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .map_or_else(|| ProcessExit::Signal(status.signal()), ProcessExit::Code)
}

#[cfg(not(unix))]
fn exit_from_status(status: ExitStatus) -> ProcessExit {
    status
        .code()
        .map_or(ProcessExit::Signal(None), ProcessExit::Code)
}
