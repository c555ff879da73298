pub mod protocol;
pub mod registry;
mod server;
pub mod tool_handlers;

pub use protocol::*;
pub use registry::{ToolRegistry, create_default_registry};
pub use server::McpServer;
