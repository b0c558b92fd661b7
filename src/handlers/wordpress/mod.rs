//! WordPress REST API tools.
//!
//! [`WordPressHandler`] is the dispatch boundary: every tool call ends as a
//! text result, whatever went wrong underneath.

pub mod args;
pub mod catalog;
pub mod client;
pub mod models;
pub mod registry;
pub mod tools;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::WordPressConfig;
use crate::error::{Error, Result};
use crate::mcp::{
    CallToolResult, Content, InitializeParams, InitializeResult, McpError, McpHandler,
    ServerCapabilities, ServerInfo, Tool, ToolCallParams, ToolsCapability, PROTOCOL_VERSION,
};

pub use args::Arguments;
pub use client::{
    ApiRequest, ApiResponse, HttpBackend, ReqwestBackend, RequestBody, WordPressClient,
};
pub use registry::ToolRegistry;

pub const SERVER_NAME: &str = "wordpress-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct WordPressHandler {
    config: WordPressConfig,
    backend: Arc<dyn HttpBackend>,
    registry: ToolRegistry,
}

impl WordPressHandler {
    /// Handler talking to the configured site through `reqwest`.
    pub fn new(config: WordPressConfig) -> Result<Self> {
        let backend = ReqwestBackend::new(Duration::from_secs(config.timeout_seconds))?;
        Ok(Self::with_backend(config, Arc::new(backend)))
    }

    pub fn with_backend(config: WordPressConfig, backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            config,
            backend,
            registry: ToolRegistry::wordpress(),
        }
    }

    pub fn server_info() -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: SERVER_VERSION.to_string(),
        }
    }

    /// Run one tool and render the outcome. Never fails.
    pub async fn dispatch(&self, name: &str, arguments: Arguments) -> CallToolResult {
        info!(tool = name, "Tool invocation");

        match self.execute(name, arguments).await {
            Ok(text) => CallToolResult::success(vec![Content::text(text)]),
            Err(e) => {
                if e.is_remote() {
                    warn!(tool = name, "WordPress rejected the request");
                } else {
                    warn!(tool = name, error = %e, "Tool failed");
                }
                CallToolResult::error(vec![Content::text(e.to_string())])
            }
        }
    }

    async fn execute(&self, name: &str, arguments: Arguments) -> Result<String> {
        if !self.config.is_complete() {
            return Err(Error::Config);
        }

        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| Error::UnknownTool(name.to_string()))?;

        // Fresh Authorization header per invocation
        let client = WordPressClient::new(Arc::clone(&self.backend), &self.config);
        tool(&client, arguments).await
    }
}

#[async_trait]
impl McpHandler for WordPressHandler {
    async fn initialize(
        &self,
        params: InitializeParams,
    ) -> std::result::Result<InitializeResult, McpError> {
        if let Some(client) = &params.client_info {
            info!("Client connected: {}", client.name);
        }
        info!("WordPress MCP Handler initialized");

        Ok(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: Self::server_info(),
        })
    }

    async fn list_tools(&self) -> std::result::Result<Vec<Tool>, McpError> {
        Ok(catalog::tool_definitions())
    }

    async fn call_tool(
        &self,
        params: ToolCallParams,
    ) -> std::result::Result<CallToolResult, McpError> {
        let arguments = params.arguments.unwrap_or_default();
        Ok(self.dispatch(&params.name, arguments).await)
    }
}
