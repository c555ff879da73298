//! CLI module for direct command-line usage
//!
//! The binary path is the only required argument. Without `--url` the
//! process serves MCP on stdio; with it a single fuzz job runs and its
//! output is printed.

mod runner;

use std::path::PathBuf;

use clap::Parser;

pub use runner::{fuzz_once, run_fuzz};

/// ffuf MCP server - run the ffuf web fuzzer from MCP clients
#[derive(Parser, Debug)]
#[command(name = "ffuf-mcp")]
#[command(about = "MCP server exposing the ffuf web fuzzer as the do-ffuf tool")]
#[command(version)]
#[command(after_help = "EXAMPLES:
    # Start MCP server (for Claude Code or any MCP client)
    ffuf-mcp /usr/local/bin/ffuf

    # Start MCP server with custom config
    ffuf-mcp --config /path/to/config.yaml /usr/local/bin/ffuf

    # Run one fuzz job directly and print its output
    ffuf-mcp /usr/local/bin/ffuf --url https://target.test/FUZZ -- -w words.txt -mc 200")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the ffuf binary
    #[arg(value_name = "FFUF_BINARY")]
    pub ffuf_binary: PathBuf,

    /// Run a single fuzz job against this URL instead of serving MCP
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Extra ffuf arguments for --url mode, given after `--`
    #[arg(last = true, requires = "url", value_name = "FFUF_ARGS")]
    pub ffuf_args: Vec<String>,
}

impl Cli {
    /// Whether this invocation serves MCP on stdio
    #[must_use]
    pub const fn is_server_mode(&self) -> bool {
        self.url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_binary_is_required() {
        let err = Cli::try_parse_from(["ffuf-mcp"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.to_string().contains("Usage: ffuf-mcp"));
    }

    #[test]
    fn test_server_mode() {
        let cli = Cli::try_parse_from(["ffuf-mcp", "/usr/bin/ffuf"]).unwrap();
        assert_eq!(cli.ffuf_binary, PathBuf::from("/usr/bin/ffuf"));
        assert!(cli.config.is_none());
        assert!(cli.is_server_mode());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["ffuf-mcp", "-c", "/etc/ffuf-mcp.yaml", "ffuf"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/ffuf-mcp.yaml")));
        assert_eq!(cli.ffuf_binary, PathBuf::from("ffuf"));
    }

    #[test]
    fn test_one_shot_mode_with_args() {
        let cli = Cli::try_parse_from([
            "ffuf-mcp",
            "/usr/bin/ffuf",
            "--url",
            "http://example.com/FUZZ",
            "--",
            "-w",
            "words.txt",
            "-H",
            "X-Test: 1",
        ])
        .unwrap();
        assert!(!cli.is_server_mode());
        assert_eq!(cli.url.as_deref(), Some("http://example.com/FUZZ"));
        assert_eq!(cli.ffuf_args, vec!["-w", "words.txt", "-H", "X-Test: 1"]);
    }

    #[test]
    fn test_ffuf_args_require_url() {
        let err = Cli::try_parse_from(["ffuf-mcp", "/usr/bin/ffuf", "--", "-w", "x"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
