//! Tool Handler Port
//!
//! This module defines the trait for MCP tool handlers,
//! enabling a plugin-like architecture where each tool
//! can be implemented independently.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::process::ProcessRunner;
use super::protocol::ToolCallResult;
use crate::config::Config;
use crate::error::Result;

/// Schema definition for a tool
#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: &'static str,
}

/// Context provided to tool handlers during execution
pub struct ToolContext {
    pub config: Arc<Config>,
    pub runner: Arc<dyn ProcessRunner>,
}

impl ToolContext {
    pub fn new(config: Arc<Config>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { config, runner }
    }
}

/// Trait for tool handlers
///
/// Each tool in the MCP server implements this trait, providing
/// a consistent interface for tool registration and execution.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the tool's name (used for routing)
    fn name(&self) -> &'static str;

    /// Get the tool's input schema as a JSON string
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with the given arguments
    ///
    /// # Arguments
    /// * `args` - The tool arguments as a JSON value
    /// * `ctx` - The execution context with dependencies
    ///
    /// # Returns
    /// The tool result, either success or error
    async fn execute(&self, args: Option<Value>, ctx: &ToolContext) -> Result<ToolCallResult>;
}
