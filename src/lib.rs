//! # wordpress-mcp
//!
//! Model Context Protocol (MCP) server that exposes WordPress content
//! management (posts, categories, tags, media) as tools.
//!
//! Each tool call becomes one authenticated request against the site's
//! `/wp-json/wp/v2` REST API, and the JSON response is rendered as text.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod mcp;

pub use config::{McpConfig, WordPressConfig};
pub use error::{Error, Result};
pub use handlers::WordPressHandler;
pub use mcp::McpServer;
