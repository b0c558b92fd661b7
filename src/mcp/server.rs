use async_trait::async_trait;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::mcp::{
    CallToolResult, InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, McpError,
    Tool, ToolCallParams,
};

#[async_trait]
pub trait McpHandler: Send + Sync {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult, McpError>;
    async fn list_tools(&self) -> Result<Vec<Tool>, McpError>;
    async fn call_tool(&self, params: ToolCallParams) -> Result<CallToolResult, McpError>;
}

/// Line-delimited JSON-RPC 2.0 server driving a single [`McpHandler`].
///
/// Messages are handled one at a time in arrival order.
pub struct McpServer {
    handler: Arc<dyn McpHandler>,
}

impl McpServer {
    pub fn new(handler: Arc<dyn McpHandler>) -> Self {
        Self { handler }
    }

    /// Serve on the process's stdin/stdout until stdin reaches EOF.
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        info!("MCP Server running on stdio");
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Read one JSON-RPC message per line from `reader` and write each
    /// response as one line to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buffer = Vec::new();

        loop {
            buffer.clear();
            let bytes_read = reader.read_until(b'\n', &mut buffer).await?;

            if bytes_read == 0 {
                debug!("Input closed, stopping server");
                break; // EOF
            }

            let response = match std::str::from_utf8(&buffer) {
                Ok(line) => self.process_line(line).await,
                Err(e) => {
                    warn!("Discarding message that is not valid UTF-8: {}", e);
                    Some(JsonRpcResponse::failure(
                        serde_json::Value::Null,
                        McpError::Parse(e.to_string()).into(),
                    ))
                }
            };
            let Some(response) = response else {
                continue;
            };

            let response_str = serde_json::to_string(&response)?;
            writer.write_all(response_str.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Handle one raw line. Returns `None` for blank lines and notifications.
    pub async fn process_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!("Failed to parse JSON-RPC message: {}", e);
                return Some(JsonRpcResponse::failure(
                    serde_json::Value::Null,
                    McpError::Parse(e.to_string()).into(),
                ));
            }
        };

        self.process_request(request).await
    }

    pub async fn process_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!("Notification received: {}", request.method);
            return None;
        };

        debug!("Request received: method={}", request.method);

        match self.dispatch(request).await {
            Ok(result) => Some(JsonRpcResponse::success(id, result)),
            Err(e) => {
                error!("Error processing request: {}", e);
                Some(JsonRpcResponse::failure(id, e.into()))
            }
        }
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Result<serde_json::Value, McpError> {
        match request.method.as_str() {
            "initialize" => {
                let params: InitializeParams = match request.params {
                    Some(params) => serde_json::from_value(params)
                        .map_err(|e| McpError::InvalidParams(e.to_string()))?,
                    None => InitializeParams::default(),
                };
                let result = self.handler.initialize(params).await?;
                Ok(serde_json::to_value(result)?)
            }
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => {
                let tools = self.handler.list_tools().await?;
                Ok(serde_json::json!({ "tools": tools }))
            }
            "tools/call" => {
                let params = request.params.ok_or_else(|| {
                    McpError::InvalidParams("Missing parameters for tools/call".to_string())
                })?;
                let params: ToolCallParams = serde_json::from_value(params)
                    .map_err(|e| McpError::InvalidParams(e.to_string()))?;
                let result = self.handler.call_tool(params).await?;
                Ok(serde_json::to_value(result)?)
            }
            _ => Err(McpError::MethodNotFound(request.method.clone())),
        }
    }
}
