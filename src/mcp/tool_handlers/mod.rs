//! MCP tool handlers

mod do_ffuf;

pub use do_ffuf::{DoFfufArgs, DoFfufHandler};
