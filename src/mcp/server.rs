use std::sync::Arc;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::ports::{ProcessRunner, ToolContext};
use crate::process::LocalProcessRunner;

use super::protocol::{
    ClientInfo, InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION, SUPPORTED_PROTOCOL_VERSIONS,
    ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult, ToolsCapability,
    ToolsListResult,
};
use super::registry::{ToolRegistry, create_default_registry};

const SERVER_INSTRUCTIONS: &str = "Runs the ffuf web fuzzer. Call do-ffuf with the target \
     `url` (use the FUZZ keyword where payloads go) and `ffuf_args`, the remaining ffuf \
     flags such as [\"-w\", \"/path/to/wordlist\", \"-mc\", \"200\"]. The call returns \
     once ffuf exits, with its combined stdout and stderr.";

/// MCP Server that communicates over stdio
pub struct McpServer {
    config: Arc<Config>,
    runner: Arc<dyn ProcessRunner>,
    registry: ToolRegistry,
    client_info: RwLock<Option<ClientInfo>>,
}

impl McpServer {
    /// Create a server that spawns ffuf on the local machine
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_runner(config, Arc::new(LocalProcessRunner::new()))
    }

    /// Create a server with a custom process runner
    #[must_use]
    pub fn with_runner(config: Config, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            config: Arc::new(config),
            runner,
            registry: create_default_registry(),
            client_info: RwLock::new(None),
        }
    }

    /// Name the client gave in `initialize`, or `unknown` before that
    async fn client_name(&self) -> String {
        self.client_info
            .read()
            .await
            .as_ref()
            .map_or_else(|| "unknown".to_string(), |c| c.name.clone())
    }

    fn create_tool_context(&self) -> ToolContext {
        ToolContext::new(Arc::clone(&self.config), Arc::clone(&self.runner))
    }

    /// Run the server, reading from stdin and writing to stdout
    ///
    /// # Errors
    ///
    /// Returns an error if reading from stdin fails.
    pub async fn run(self: Arc<Self>) -> Result<()> {
        info!("ffuf MCP Server running on stdio");
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Serve newline-delimited JSON-RPC from `reader`, writing responses to `writer`.
    ///
    /// Every request runs in its own task so a long fuzz job never blocks
    /// other calls. Responses are written by a single writer task in
    /// completion order. Returns after `reader` hits EOF and every in-flight
    /// request has been answered.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub async fn serve<R, W>(self: Arc<Self>, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<JsonRpcResponse>(100);

        // Spawn writer task (single writer to the output stream)
        let writer_handle = tokio::spawn(async move {
            while let Some(response) = rx.recv().await {
                let json_str = match serde_json::to_string(&response) {
                    Ok(s) => s,
                    Err(e) => {
                        error!(error = %e, "Failed to serialize response");
                        continue;
                    }
                };
                debug!(response = %json_str, "Sending response");

                if let Err(e) = writer.write_all(json_str.as_bytes()).await {
                    error!(error = %e, "Failed to write response");
                    break;
                }
                if let Err(e) = writer.write_all(b"\n").await {
                    error!(error = %e, "Failed to write newline");
                    break;
                }
                if let Err(e) = writer.flush().await {
                    error!(error = %e, "Failed to flush output");
                    break;
                }
            }
        });

        let mut buf = Vec::new();
        let read_result = loop {
            buf.clear();
            let bytes_read = match reader.read_until(b'\n', &mut buf).await {
                Ok(n) => n,
                Err(e) => break Err(e.into()),
            };

            if bytes_read == 0 {
                info!("Client disconnected, shutting down");
                break Ok(());
            }

            // Bad bytes on one line must not end the session
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Request line is not valid UTF-8");
                    let response = JsonRpcResponse::error(
                        None,
                        JsonRpcError::parse_error(format!("Invalid UTF-8: {e}")),
                    );
                    let _ = tx.send(response).await;
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            debug!(request = %trimmed, "Received request");

            let request = match parse_request(trimmed) {
                Ok(req) => req,
                Err(response) => {
                    let _ = tx.send(response).await;
                    continue;
                }
            };

            let server = Arc::clone(&self);
            let tx = tx.clone();

            tokio::spawn(async move {
                if let Some(response) = server.handle_request(request).await {
                    let _ = tx.send(response).await;
                }
            });
        };

        // In-flight requests hold their own sender; the writer drains until the last one finishes
        drop(tx);
        let _ = writer_handle.await;

        read_result
    }

    /// Dispatch one request. Notifications are handled and produce no response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        let id = request.id.clone();

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params).await,
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            "ping" => JsonRpcResponse::success(id, json!({})),
            _ => {
                warn!(method = %request.method, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(&request.method))
            }
        };

        Some(response)
    }

    async fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let mut negotiated_version = PROTOCOL_VERSION.to_string();

        if let Some(p) = params {
            match serde_json::from_value::<InitializeParams>(p) {
                Ok(init_params) => {
                    info!(
                        client = %init_params.client_info.name,
                        version = %init_params.client_info.version,
                        protocol = %init_params.protocol_version,
                        "Client connected"
                    );

                    // Echo the client's version if we support it, otherwise offer our latest
                    if SUPPORTED_PROTOCOL_VERSIONS.contains(&init_params.protocol_version.as_str())
                    {
                        negotiated_version = init_params.protocol_version.clone();
                    }

                    *self.client_info.write().await = Some(init_params.client_info);
                }
                Err(e) => {
                    debug!(error = %e, "Could not parse initialize params (continuing anyway)");
                }
            }
        }

        let result = InitializeResult {
            protocol_version: negotiated_version,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
        };

        JsonRpcResponse::success_or_serialize_error(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = ToolsListResult {
            tools: self.registry.list_tools(),
        };

        JsonRpcResponse::success_or_serialize_error(id, &result)
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let Some(params) = params else {
            return JsonRpcResponse::error(id, JsonRpcError::invalid_params("Missing params"));
        };

        let call_params: ToolCallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid params: {e}")),
                );
            }
        };

        let client = self.client_name().await;
        info!(tool = %call_params.name, client = %client, "Tool call");

        let ctx = self.create_tool_context();

        match self
            .registry
            .execute(&call_params.name, call_params.arguments, &ctx)
            .await
        {
            Ok(result) => JsonRpcResponse::success_or_serialize_error(id, &result),
            Err(e) if e.is_invalid_params() => {
                warn!(tool = %call_params.name, error = %e, "Rejected tool arguments");
                JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
            }
            Err(e) => {
                error!(tool = %call_params.name, error = %e, "Tool call failed");
                let error_result = ToolCallResult::error(e.to_string());
                JsonRpcResponse::success_or_serialize_error(id, &error_result)
            }
        }
    }
}

/// Parse one input line. Invalid JSON is a parse error with a null id; valid
/// JSON that is not a request is an invalid request, echoing its id if any.
fn parse_request(line: &str) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        warn!(error = %e, "Failed to parse request");
        JsonRpcResponse::error(None, JsonRpcError::parse_error(format!("Invalid JSON: {e}")))
    })?;

    let id = value.get("id").filter(|id| !id.is_null()).cloned();
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Malformed request");
        JsonRpcResponse::error(
            id,
            JsonRpcError::invalid_request(format!("Invalid request: {e}")),
        )
    })
}
