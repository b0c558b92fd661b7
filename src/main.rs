use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use wordpress_mcp::logging::{self, LogConfig, LogFormat};
use wordpress_mcp::{McpConfig, McpServer, WordPressHandler};

/// MCP server exposing a WordPress site's posts, categories, tags and media as tools.
///
/// Speaks JSON-RPC on stdin/stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "wordpress-mcp", version, about)]
struct Cli {
    /// Configuration file (defaults to ./wordpress-mcp.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or EnvFilter directive, overrides the configuration file
    #[arg(long, env = "WORDPRESS_MCP_LOG")]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<CliLogFormat>,

    /// Also write logs to rolling files in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Write a sample configuration file to the given path and exit
    #[arg(long, value_name = "PATH")]
    generate_config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliLogFormat {
    Pretty,
    Json,
}

impl From<CliLogFormat> for LogFormat {
    fn from(format: CliLogFormat) -> Self {
        match format {
            CliLogFormat::Pretty => LogFormat::Pretty,
            CliLogFormat::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.generate_config {
        McpConfig::generate_sample_config(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let config = McpConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let mut log_config = LogConfig::from_server_config(&config.server);
    if let Some(level) = cli.log_level {
        log_config = log_config.with_level(level);
    }
    if let Some(format) = cli.log_format {
        log_config = log_config.with_format(format.into());
    }
    if let Some(dir) = cli.log_dir {
        log_config = log_config.with_log_dir(dir);
    }
    let _log_guard = logging::init_logging(&log_config)?;

    if config.wordpress.is_complete() {
        info!(
            url = %config.wordpress.url,
            user = %config.wordpress.username,
            "WordPress site configured"
        );
    } else {
        info!("WordPress credentials incomplete; tool calls will report a configuration error");
    }

    let handler = WordPressHandler::new(config.wordpress).context("failed to build HTTP client")?;
    let server = McpServer::new(Arc::new(handler));

    if let Err(e) = server.run_stdio().await {
        error!("stdio transport failed: {}", e);
        return Err(e.into());
    }

    info!("Shutting down");
    Ok(())
}
