//! Error types for the WordPress tool adapter.
//!
//! The `Display` output of each variant is the exact text handed back to the
//! MCP client, so changing a message here changes the tool result.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while executing a WordPress tool
#[derive(Debug, Error)]
pub enum Error {
    /// One or more credential fields are empty
    #[error(
        "Error: WordPress credentials not configured. Please set WORDPRESS_URL, \
         WORDPRESS_USERNAME, and WORDPRESS_APP_PASSWORD environment variables."
    )]
    Config,

    /// Non-2xx response from the WordPress REST API
    #[error("HTTP Error: {status}\n{body}")]
    Api { status: u16, body: String },

    /// Connection failure, timeout, or other transport-level failure
    #[error("Error: {}", describe_chain(.0))]
    Network(#[from] reqwest::Error),

    /// The file handed to `upload_media` could not be read
    #[error("Error: failed to read file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Tool arguments did not match the tool's input schema
    #[error("Error: invalid arguments: {0}")]
    InvalidParams(String),

    /// Response body was not the JSON shape the tool expected
    #[error("Error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the error came back from WordPress rather than from this side
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}

/// `err` followed by each of its causes, joined with `": "`.
fn describe_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        // reqwest and hyper sometimes repeat the inner message verbatim
        if !text.ends_with(&cause_text) {
            text.push_str(": ");
            text.push_str(&cause_text);
        }
        source = cause.source();
    }
    text
}
