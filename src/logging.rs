use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

const LOG_FILE_NAME: &str = "wordpress-mcp.log";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// 日次ローテーション
    Daily,
    /// 時間毎ローテーション
    Hourly,
    /// ローテーションなし
    #[default]
    Never,
}

/// ログ設定
///
/// stdout carries the MCP protocol, so console output always goes to stderr.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// ログレベル (trace, debug, info, warn, error) or a full `EnvFilter` directive
    pub level: String,
    pub format: LogFormat,
    /// ファイル出力先（None ならコンソールのみ）
    pub log_dir: Option<PathBuf>,
    pub rotation: LogRotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
            rotation: LogRotation::Never,
        }
    }
}

impl LogConfig {
    /// 設定からログ設定を作成
    pub fn from_server_config(server_config: &ServerConfig) -> Self {
        Self {
            level: server_config.log_level.clone(),
            format: server_config.log_format,
            log_dir: server_config.log_dir.clone(),
            rotation: server_config.log_rotation,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_log_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Build the filter, falling back to `info` when the directive does not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// ログシステムを初期化
///
/// The returned guard flushes the file writer on drop and must be held for
/// the life of the process.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = config.env_filter();

    let guard = match &config.log_dir {
        Some(dir) => {
            ensure_log_dir(dir)?;
            let file_appender = match config.rotation {
                LogRotation::Daily => rolling::daily(dir, LOG_FILE_NAME),
                LogRotation::Hourly => rolling::hourly(dir, LOG_FILE_NAME),
                LogRotation::Never => rolling::never(dir, LOG_FILE_NAME),
            };
            let (file_writer, guard) = non_blocking(file_appender);
            let writer = std::io::stderr.and(file_writer);

            let builder = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            match config.format {
                LogFormat::Pretty => builder.try_init(),
                LogFormat::Json => builder.json().try_init(),
            }
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {}", e))?;

            Some(guard)
        }
        None => {
            let builder = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(true);
            match config.format {
                LogFormat::Pretty => builder.try_init(),
                LogFormat::Json => builder.json().try_init(),
            }
            .map_err(|e| anyhow::anyhow!("failed to install subscriber: {}", e))?;

            None
        }
    };

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        log_dir = ?config.log_dir,
        "Logging initialized"
    );

    Ok(guard)
}

/// ログディレクトリを確保
fn ensure_log_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
