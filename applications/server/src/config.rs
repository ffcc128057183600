/// Server configuration
use crate::error::{Result, ServerError};
use crate::observe::Thresholds;
use crate::services::CountPolicy;
use rollcall_source::{SourceConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_database")]
    pub database: DatabaseSettings,

    #[serde(default = "default_source")]
    pub source: SourceSettings,

    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means the upstream call is never cut short
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default = "default_count")]
    pub default_count: u32,

    #[serde(default = "default_max_count")]
    pub max_count: u32,
}

impl DatabaseSettings {
    /// On-disk location of a file-backed SQLite URL; `None` for in-memory databases
    pub fn file_path(&self) -> Option<PathBuf> {
        let rest = self
            .url
            .strip_prefix("sqlite://")
            .or_else(|| self.url.strip_prefix("sqlite:"))?;
        let path = rest.split('?').next().unwrap_or_default();

        if path.is_empty() || path.starts_with(":memory:") {
            None
        } else {
            Some(PathBuf::from(path))
        }
    }
}

impl SourceSettings {
    pub fn client_config(&self) -> SourceConfig {
        let config = SourceConfig::new(self.base_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    pub fn count_policy(&self) -> CountPolicy {
        CountPolicy {
            default_count: self.default_count,
            max_count: self.max_count,
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Sources, lowest precedence first: built-in defaults, the TOML file at
    /// `path` (or `config.toml` when present), `ROLLCALL_*` variables using
    /// `__` between nested keys (`ROLLCALL_SOURCE__BASE_URL`), then plain
    /// `PORT` and `DATABASE_URL`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.exists() => {
                return Err(ServerError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("ROLLCALL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        settings = settings
            .set_override_option("server.port", std::env::var("PORT").ok())
            .and_then(|s| s.set_override_option("database.url", std::env::var("DATABASE_URL").ok()))
            .map_err(|e| ServerError::Config(e.to_string()))?;

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(ServerError::Config(
                "Database URL is required (set DATABASE_URL or ROLLCALL_DATABASE__URL)".to_string(),
            ));
        }

        let base_url = self.source.base_url.as_str();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ServerError::Config(format!(
                "Source URL must be http(s): {:?}",
                base_url
            )));
        }

        if self.source.default_count == 0 {
            return Err(ServerError::Config(
                "source.default_count must be at least 1".to_string(),
            ));
        }

        if self.source.default_count > self.source.max_count {
            return Err(ServerError::Config(format!(
                "source.default_count ({}) exceeds source.max_count ({})",
                self.source.default_count, self.source.max_count
            )));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

fn default_database() -> DatabaseSettings {
    DatabaseSettings {
        url: default_database_url(),
        max_connections: default_max_connections(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/rollcall.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_source() -> SourceSettings {
    SourceSettings {
        base_url: default_base_url(),
        timeout_secs: None,
        default_count: default_count(),
        max_count: default_max_count(),
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_count() -> u32 {
    10
}

/// randomuser.me refuses larger batches
fn default_max_count() -> u32 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            database: default_database(),
            source: default_source(),
            thresholds: Thresholds::default(),
        }
    }
}
