use std::fmt;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::logging::{LogFormat, LogRotation};

/// 作業ディレクトリで自動的に探す設定ファイル名
pub const DEFAULT_CONFIG_FILE: &str = "wordpress-mcp.toml";

/// WordPress REST API 呼び出しのデフォルトタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Environment variable prefix for layered overrides (`WORDPRESS_MCP__SERVER__LOG_LEVEL`)
const ENV_PREFIX: &str = "WORDPRESS_MCP";

pub const ENV_WORDPRESS_URL: &str = "WORDPRESS_URL";
pub const ENV_WORDPRESS_USERNAME: &str = "WORDPRESS_USERNAME";
pub const ENV_WORDPRESS_APP_PASSWORD: &str = "WORDPRESS_APP_PASSWORD";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct McpConfig {
    pub server: ServerConfig,
    pub wordpress: WordPressConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub log_level: String,
    pub log_format: LogFormat,
    /// ログファイル出力先（未指定なら stderr のみ）
    pub log_dir: Option<PathBuf>,
    pub log_rotation: LogRotation,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            log_dir: None,
            log_rotation: LogRotation::Never,
        }
    }
}

/// Credentials and connection settings for one WordPress site.
///
/// Empty fields are allowed here; they are only rejected when a tool is
/// actually called.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WordPressConfig {
    pub url: String,
    pub username: String,
    pub password: String, // Application Password
    pub timeout_seconds: u64,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: String::new(),
            password: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl fmt::Debug for WordPressConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordPressConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl WordPressConfig {
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    /// 環境変数による個別上書き
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_WORDPRESS_URL) {
            self.url = url;
        }
        if let Some(username) = lookup(ENV_WORDPRESS_USERNAME) {
            self.username = username;
        }
        if let Some(password) = lookup(ENV_WORDPRESS_APP_PASSWORD) {
            self.password = password;
        }
    }

    /// All three credential fields are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    /// `<site-url>/wp-json/wp/v2`, with any trailing slash on the site URL dropped
    pub fn api_root(&self) -> String {
        format!("{}/wp-json/wp/v2", self.url.trim_end_matches('/'))
    }

    /// HTTP Basic credentials, `Basic base64(username:password)`.
    pub fn authorization_header(&self) -> String {
        let credentials = format!("{}:{}", self.username, self.password);
        format!("Basic {}", general_purpose::STANDARD.encode(credentials))
    }
}

impl McpConfig {
    /// 設定ファイルから読み込み、環境変数で上書き
    ///
    /// Layers, lowest to highest priority: built-in defaults, the TOML file
    /// (`path`, or `wordpress-mcp.toml` if it exists), `WORDPRESS_MCP__*`
    /// variables, then `WORDPRESS_URL` / `WORDPRESS_USERNAME` /
    /// `WORDPRESS_APP_PASSWORD`.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::new(
                &path.to_string_lossy(),
                config::FileFormat::Toml,
            )),
            None => settings.add_source(
                config::File::new(DEFAULT_CONFIG_FILE, config::FileFormat::Toml).required(false),
            ),
        };

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut config: McpConfig = settings.build()?.try_deserialize()?;
        config
            .wordpress
            .apply_env_overrides(|key| std::env::var(key).ok());

        Ok(config)
    }

    /// サンプル設定ファイルを生成
    pub fn generate_sample_config(path: &Path) -> anyhow::Result<()> {
        let sample_config = McpConfig {
            server: ServerConfig::default(),
            wordpress: WordPressConfig {
                url: "https://your-wordpress-site.com".to_string(),
                username: "your_username".to_string(),
                password: "xxxx xxxx xxxx xxxx xxxx xxxx".to_string(),
                timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            },
        };

        let toml_content = toml::to_string_pretty(&sample_config)?;

        let sample_content = format!(
            r#"# wordpress-mcp configuration
#
# Save as wordpress-mcp.toml in the working directory, or pass --config <path>.
# WORDPRESS_URL, WORDPRESS_USERNAME and WORDPRESS_APP_PASSWORD override the
# [wordpress] values; WORDPRESS_MCP__SERVER__LOG_LEVEL=debug style variables
# override anything else.
#
# The password is a WordPress Application Password
# (Users > Profile > Application Passwords), not the login password.

{}"#,
            toml_content
        );

        std::fs::write(path, sample_content)?;
        Ok(())
    }
}
