//! Configuration loading and management
//!
//! Sources are layered in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. a YAML file, when `TUPULUNG_CONFIG` points at one
//! 3. environment variables (a `.env` file is loaded into the environment
//!    first when present)
//!
//! The result is built once at startup and shared as `Arc<AppConfig>`.

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the optional YAML config file
pub const CONFIG_PATH_ENV: &str = "TUPULUNG_CONFIG";

/// Signing secret used when nothing else is configured
pub const DEVELOPMENT_JWT_SECRET: &str = "tupulung-development-secret";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Prefix for every HATEOAS link (scheme optional)
    pub base_url: String,

    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "localhost:8000".to_string(),
            port: 8000,
        }
    }
}

/// MySQL connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "root".to_string(),
            name: "tupulung".to_string(),
        }
    }
}

/// Token settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            token_ttl_hours: 6,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the rest of the application cannot work with
    pub fn validate(&self) -> Result<()> {
        let expires = Duration::try_hours(self.auth.token_ttl_hours)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl));
        if self.auth.token_ttl_hours <= 0 || expires.is_none() {
            bail!(
                "auth.token_ttl_hours must be a positive number of hours, got {}",
                self.auth.token_ttl_hours
            );
        }
        Ok(())
    }

    /// Build the process configuration: `.env`, optional YAML, then env vars
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_yaml_file(&path)?,
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from `lookup` (normally the process environment).
    ///
    /// Empty values are ignored so a blank line in `.env` does not wipe a
    /// default.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("APP_PORT") {
            self.app.port = port
                .trim()
                .parse()
                .with_context(|| format!("APP_PORT is not a valid port: '{}'", port))?;
        }
        if let Some(base_url) = get("APP_BASE_URL") {
            self.app.base_url = base_url;
        }
        if let Some(host) = get("DB_HOST") {
            self.database.host = host;
        }
        if let Some(port) = get("DB_PORT") {
            self.database.port = port
                .trim()
                .parse()
                .with_context(|| format!("DB_PORT is not a valid port: '{}'", port))?;
        }
        if let Some(username) = get("DB_USERNAME") {
            self.database.username = username;
        }
        if let Some(password) = get("DB_PASSWORD") {
            self.database.password = password;
        }
        if let Some(name) = get("DB_NAME") {
            self.database.name = name;
        }
        if let Some(secret) = get("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        Ok(())
    }

    /// MySQL DSN for `sqlx`, with credentials percent-encoded
    pub fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            urlencoding::encode(&self.database.username),
            urlencoding::encode(&self.database.password),
            self.database.host,
            self.database.port,
            urlencoding::encode(&self.database.name)
        )
    }

    /// Connection options for the MySQL pool
    #[cfg(feature = "mysql")]
    pub fn connect_options(&self) -> sqlx::mysql::MySqlConnectOptions {
        sqlx::mysql::MySqlConnectOptions::new()
            .host(&self.database.host)
            .port(self.database.port)
            .username(&self.database.username)
            .password(&self.database.password)
            .database(&self.database.name)
    }

    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.app.port)
    }

    pub fn uses_development_secret(&self) -> bool {
        self.auth.jwt_secret == DEVELOPMENT_JWT_SECRET
    }
}
