// Use mimalloc allocator when the feature is enabled (recommended for musl builds)
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod mcp;
pub mod ports;
pub mod process;

pub use config::Config;
pub use domain::{FuzzJob, RunFuzzJobUseCase};
pub use error::{BridgeError, Result};
pub use mcp::McpServer;
pub use ports::{
    ProcessExit, ProcessOutput, ProcessRunner, SpawnOptions, ToolAnnotations, ToolContext,
    ToolHandler, ToolSchema,
};
pub use process::LocalProcessRunner;

// Re-exports for fuzzing
#[doc(hidden)]
pub use domain::{FfufCommandBuilder, validate_target_url};
#[doc(hidden)]
pub use mcp::protocol::{JsonRpcRequest, ToolCallParams};
#[doc(hidden)]
pub use mcp::tool_handlers::DoFfufArgs;
