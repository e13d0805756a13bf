/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * selects the storage backend.
 *
 * # Configuration Sources
 *
 * Values are layered, later sources winning:
 * 1. Built-in defaults (suitable for local development)
 * 2. A TOML file: `$TOWNSQUARE_CONFIG`, or `./townsquare.toml` if present
 * 3. Environment variables (`SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`,
 *    `JWT_SECRET`, `TOKEN_TTL_HOURS`, `SITE_ADMINS`)
 *
 * # Error Handling
 *
 * A bad config file or an invalid value stops startup. A database that
 * cannot be reached does not: the server logs a warning and runs on the
 * in-memory store.
 */

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::auth::sessions::MAX_TOKEN_TTL_HOURS;
use crate::backend::store::{ForumStore, MemoryStore, PgStore};
use crate::shared::{PageParams, PageRequest};

const DEFAULT_CONFIG_FILE: &str = "townsquare.toml";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatabaseSection {
    /// PostgreSQL URL; `None` runs on the in-memory store
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthSection {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bcrypt_cost: u32,
    /// Usernames that become site admins when they sign up
    pub site_admins: Vec<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_hours: 24 * 30,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            site_admins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaginationSection {
    pub default_size: u32,
    pub max_size: u32,
}

impl Default for PaginationSection {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 100,
        }
    }
}

impl PaginationSection {
    pub fn resolve(&self, request: &PageRequest) -> PageParams {
        request.resolve(self.default_size, self.max_size)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatSection {
    /// Buffered frames per user before slow sessions start lagging
    pub channel_capacity: usize,
    pub max_message_length: usize,
    pub cleanup_interval_secs: u64,
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            channel_capacity: 100,
            max_message_length: 2_000,
            cleanup_interval_secs: 300,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub auth: AuthSection,
    pub pagination: PaginationSection,
    pub chat: ChatSection,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use townsquare::backend::server::config::ServerConfig;
    ///
    /// let config = ServerConfig::load().expect("invalid configuration");
    /// println!("listening on {}", config.bind_address());
    /// ```
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("TOWNSQUARE_CONFIG")
            .map(PathBuf::from)
            .ok()
            .or_else(|| {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            });

        let mut config = match path {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay environment variables, read through `lookup`
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = parse_env("SERVER_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url).filter(|url| !url.trim().is_empty());
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("TOKEN_TTL_HOURS") {
            self.auth.token_ttl_hours = parse_env("TOKEN_TTL_HOURS", &ttl)?;
        }
        if let Some(admins) = lookup("SITE_ADMINS") {
            self.auth.site_admins = admins
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("auth.jwt_secret must not be empty".into()));
        }
        if self.auth.token_ttl_hours <= 0 {
            return Err(ConfigError::Invalid("auth.token_ttl_hours must be positive".into()));
        }
        if self.auth.token_ttl_hours > MAX_TOKEN_TTL_HOURS {
            return Err(ConfigError::Invalid(format!(
                "auth.token_ttl_hours must be at most {}",
                MAX_TOKEN_TTL_HOURS
            )));
        }
        if self.pagination.default_size == 0 || self.pagination.max_size == 0 {
            return Err(ConfigError::Invalid("page sizes must be greater than zero".into()));
        }
        if self.pagination.default_size > self.pagination.max_size {
            return Err(ConfigError::Invalid(
                "pagination.default_size must not exceed pagination.max_size".into(),
            ));
        }
        if self.chat.channel_capacity == 0 {
            return Err(ConfigError::Invalid("chat.channel_capacity must be greater than zero".into()));
        }
        if self.chat.max_message_length == 0 {
            return Err(ConfigError::Invalid(
                "chat.max_message_length must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_site_admin(&self, username: &str) -> bool {
        self.auth.site_admins.iter().any(|name| name == username)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Select and initialise the storage backend
///
/// This function:
/// 1. Connects to PostgreSQL when a database URL is configured
/// 2. Runs database migrations
/// 3. Falls back to the in-memory store otherwise
///
/// Connection errors are logged but do not prevent server startup.
pub async fn load_store(config: &ServerConfig) -> Arc<dyn ForumStore> {
    let Some(url) = config.database.url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using in-memory store; data will not persist.");
        return Arc::new(MemoryStore::new());
    };

    tracing::info!("Connecting to database...");

    let store = match PgStore::connect(url, config.database.max_connections).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Falling back to in-memory store.");
            return Arc::new(MemoryStore::new());
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match store.migrate().await {
        Ok(()) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Arc::new(store)
}
