//! Tool Registry
//!
//! This module provides a registry for tool handlers, enabling
//! registration and lookup of tools at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;

use crate::error::{BridgeError, Result};
use crate::mcp::protocol::{Tool, ToolAnnotations, ToolCallResult};
#[cfg(test)]
use crate::ports::ToolSchema;
use crate::ports::{ToolContext, ToolHandler};

/// Registry for tool handlers
///
/// The registry maintains a collection of tool handlers and provides
/// methods for registering, looking up, and listing available tools.
#[derive(Default)]
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a new empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a tool handler
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.name().to_string();
        self.handlers.insert(name, handler);
    }

    /// Get a tool handler by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.handlers.get(name)
    }

    /// Execute a tool by name
    ///
    /// # Errors
    ///
    /// Returns an error if the tool is not found or if the tool execution fails.
    pub async fn execute(
        &self,
        tool_name: &str,
        args: Option<serde_json::Value>,
        ctx: &ToolContext,
    ) -> Result<ToolCallResult> {
        let handler = self
            .get(tool_name)
            .ok_or_else(|| BridgeError::McpUnknownTool {
                tool: tool_name.to_string(),
            })?;

        handler.execute(args, ctx).await
    }

    /// Get all registered tools as MCP Tool definitions, sorted by name
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .handlers
            .values()
            .map(|handler| {
                let schema = handler.schema();
                let annotations = tool_annotations(schema.name);
                Tool {
                    name: schema.name.to_string(),
                    description: schema.description.to_string(),
                    input_schema: serde_json::from_str(schema.input_schema)
                        .unwrap_or_else(|_| json!({})),
                    annotations: if annotations.is_empty() {
                        None
                    } else {
                        Some(annotations)
                    },
                }
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Get the number of registered tools
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the registry is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

/// Behavioral hints for a tool, empty for unknown names.
#[must_use]
pub fn tool_annotations(tool_name: &str) -> ToolAnnotations {
    match tool_name {
        "do-ffuf" => ToolAnnotations::open_world("Run ffuf"),
        _ => ToolAnnotations::default(),
    }
}

/// Create the registry with every tool this server exposes.
#[must_use]
pub fn create_default_registry() -> ToolRegistry {
    use super::tool_handlers::DoFfufHandler;

    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DoFfufHandler));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockProcessRunner;
    use crate::ports::mock::create_test_context;
    use async_trait::async_trait;

    struct TestHandler;

    #[async_trait]
    impl ToolHandler for TestHandler {
        fn name(&self) -> &'static str {
            "test_tool"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "test_tool",
                description: "A test tool",
                input_schema: r#"{"type": "object", "properties": {}}"#,
            }
        }

        async fn execute(
            &self,
            _args: Option<serde_json::Value>,
            _ctx: &ToolContext,
        ) -> Result<ToolCallResult> {
            Ok(ToolCallResult::text("test result"))
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(TestHandler));

        assert!(registry.get("test_tool").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(TestHandler));

        let tools = registry.list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, "test_tool");
        assert!(tools[0].annotations.is_none());
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);

        registry.register(Arc::new(TestHandler));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_default_registry_has_do_ffuf() {
        let registry = create_default_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("do-ffuf").is_some());
    }

    #[test]
    fn test_default_registry_tool_definition() {
        let tools = create_default_registry().list_tools();
        let tool = &tools[0];
        assert_eq!(tool.name, "do-ffuf");
        assert_eq!(tool.description, "Run ffuf with specified URL");
        assert_eq!(tool.input_schema["type"], "object");
        let annotations = tool.annotations.as_ref().unwrap();
        assert_eq!(annotations.open_world_hint, Some(true));
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let registry = create_default_registry();
        let ctx = create_test_context(Arc::new(MockProcessRunner::succeeding("")));

        let err = registry.execute("do-nmap", None, &ctx).await.unwrap_err();
        assert!(matches!(err, BridgeError::McpUnknownTool { tool } if tool == "do-nmap"));
    }

    #[tokio::test]
    async fn test_execute_dispatches_to_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(TestHandler));
        let ctx = create_test_context(Arc::new(MockProcessRunner::succeeding("")));

        let result = registry.execute("test_tool", None, &ctx).await.unwrap();
        assert_eq!(result.first_text(), Some("test result"));
    }

    #[test]
    fn test_unknown_tool_has_empty_annotations() {
        assert!(tool_annotations("something_else").is_empty());
    }
}
