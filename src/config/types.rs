use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Path of the ffuf binary.
    ///
    /// Always supplied on the command line, never read from YAML.
    #[serde(skip)]
    pub binary: PathBuf,

    #[serde(default)]
    pub ffuf: FfufConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Attach the ffuf binary path given at startup.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }
}

/// How the ffuf process is launched
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FfufConfig {
    /// Working directory for every spawned ffuf process.
    ///
    /// Relative wordlist paths in `ffuf_args` resolve against it.
    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    /// Extra environment variables passed to ffuf on top of the
    /// server's own environment.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

/// How captured output is reported back to the caller
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Append the captured output to the error message when ffuf exits
    /// with a nonzero status or is killed by a signal (default: false).
    #[serde(default)]
    pub include_output_on_failure: bool,
}
