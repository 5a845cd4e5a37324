//! Configuration management for the bookshelf services

use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origins allowed for CORS. Empty means no CORS headers are emitted.
    #[serde(default)]
    pub cors_origins: Vec<String>,
    /// Maximum request body size in bytes. Default: 1 MiB
    #[serde(default = "default_max_request_body_size")]
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Server URL of the document database, without the database name.
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Test database URL. If set, integration tests connect here instead of `url`.
    /// Environment variable: `BOOKS__DATABASE__TEST_DATABASE_URL`
    pub test_database_url: Option<String>,
    #[serde(default = "default_database_name")]
    pub name: String,
    /// Collection holding the book documents (a table in PostgreSQL).
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_pool_min_size")]
    pub pool_min_size: u32,
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
    #[serde(default = "default_pool_timeout")]
    pub pool_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// CSV file seeding the in-memory catalog, relative to the working directory.
    #[serde(default = "default_catalog_source")]
    pub source_path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON formatting for logs (recommended for production)
    #[serde(default)]
    pub json: bool,

    /// Enable file logging in addition to console
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files (default: ./logs)
    #[serde(default = "default_log_directory")]
    pub file_directory: String,

    /// Log file prefix (default: bookshelf)
    #[serde(default = "default_log_file_prefix")]
    pub file_prefix: String,

    /// Log rotation: daily, hourly, minutely, never (default: daily)
    #[serde(default = "default_log_rotation")]
    pub file_rotation: String,

    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Deployment environment (dev, staging, prod)
    #[serde(default = "default_environment")]
    pub deployment_environment: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_request_body_size() -> usize {
    1024 * 1024
}

fn default_database_url() -> String {
    "postgres://localhost:5432".to_string()
}

fn default_database_name() -> String {
    "book_db".to_string()
}

fn default_collection() -> String {
    "books".to_string()
}

fn default_pool_min_size() -> u32 {
    1
}

fn default_pool_max_size() -> u32 {
    10
}

fn default_pool_timeout() -> u64 {
    30
}

fn default_catalog_source() -> String {
    "book.csv".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "./logs".to_string()
}

fn default_log_file_prefix() -> String {
    "bookshelf".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

const LOG_ROTATIONS: [&str; 4] = ["daily", "hourly", "minutely", "never"];

impl Config {
    /// Load configuration from environment and config files
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default(
                "server.max_request_body_size",
                default_max_request_body_size() as i64,
            )?
            .set_default("database.url", default_database_url())?
            .set_default("database.name", default_database_name())?
            .set_default("database.collection", default_collection())?
            .set_default("database.pool_min_size", default_pool_min_size())?
            .set_default("database.pool_max_size", default_pool_max_size())?
            .set_default("database.pool_timeout_seconds", default_pool_timeout())?
            .set_default("catalog.source_path", default_catalog_source())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)?
            .set_default("logging.file_enabled", false)?
            .set_default("logging.file_directory", default_log_directory())?
            .set_default("logging.file_prefix", default_log_file_prefix())?
            .set_default("logging.file_rotation", default_log_rotation())?
            .set_default("logging.service_name", default_service_name())?
            .set_default("logging.deployment_environment", default_environment())?
            .add_source(config::File::with_name("config").required(false))
            // Double underscore maps to nested keys: BOOKS__DATABASE__URL -> database.url
            .add_source(
                config::Environment::with_prefix("BOOKS")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = config.try_deserialize()?;

        if std::env::var("BOOKS__DATABASE__URL").is_err() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                config.database.url = url;
            }
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        Ok(addr.parse()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !is_plain_identifier(&self.database.collection) {
            return Err(format!(
                "database.collection '{}' must contain only letters, digits and '_' and not start with a digit",
                self.database.collection
            ));
        }
        if self.database.pool_max_size == 0 {
            return Err("database.pool_max_size must be > 0".to_string());
        }
        if self.database.pool_min_size > self.database.pool_max_size {
            return Err("database.pool_min_size must be <= database.pool_max_size".to_string());
        }
        if !LOG_ROTATIONS.contains(&self.logging.file_rotation.as_str()) {
            return Err(format!(
                "logging.file_rotation must be one of {:?}",
                LOG_ROTATIONS
            ));
        }
        if self.catalog.source_path.trim().is_empty() {
            return Err("catalog.source_path must not be empty".to_string());
        }

        Ok(())
    }
}

/// The collection name is interpolated into SQL, so it must be a bare identifier.
fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                cors_origins: Vec::new(),
                max_request_body_size: default_max_request_body_size(),
            },
            database: DatabaseConfig {
                url: default_database_url(),
                test_database_url: None,
                name: default_database_name(),
                collection: default_collection(),
                pool_min_size: default_pool_min_size(),
                pool_max_size: default_pool_max_size(),
                pool_timeout_seconds: default_pool_timeout(),
            },
            catalog: CatalogConfig {
                source_path: default_catalog_source(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
                json: false,
                file_enabled: false,
                file_directory: default_log_directory(),
                file_prefix: default_log_file_prefix(),
                file_rotation: default_log_rotation(),
                service_name: default_service_name(),
                deployment_environment: default_environment(),
            },
        }
    }
}
