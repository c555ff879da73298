use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ffuf_mcp::McpServer;
use ffuf_mcp::cli::{Cli, run_fuzz};
use ffuf_mcp::config::{check_binary, resolve_config};

#[tokio::main]
async fn main() -> Result<()> {
    // Exits with usage and a nonzero status when the ffuf binary is missing
    let cli = Cli::parse();

    let is_mcp_mode = cli.is_server_mode();

    // Initialize logging to stderr (stdout is used for MCP protocol in MCP mode)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(!is_mcp_mode)
        .init();

    let config = resolve_config(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to load default config".to_string(),
    })?;
    let config = config.with_binary(&cli.ffuf_binary);

    check_binary(&config.binary);

    info!(
        binary = %config.binary.display(),
        working_dir = ?config.ffuf.working_dir,
        extra_env = config.ffuf.env.len(),
        "Configuration loaded"
    );

    match cli.url {
        None => {
            let server = Arc::new(McpServer::new(config));
            server.run().await?;
        }
        Some(url) => {
            run_fuzz(Arc::new(config), &url, cli.ffuf_args).await?;
        }
    }

    Ok(())
}
