/**
 * Server Configuration
 *
 * This module handles loading of server configuration and the optional
 * PostgreSQL database connection.
 *
 * # Configuration Sources
 *
 * In increasing priority:
 * 1. Built-in defaults
 * 2. A TOML file named by `XFDOCS_CONFIG`
 * 3. Environment variables (`SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`,
 *    `BROADCAST_CAPACITY`)
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * Invalid values fall back to defaults, and a database that cannot be
 * reached falls back to the in-memory store.
 *
 * # Example File
 *
 * ```toml
 * host = "127.0.0.1"
 * port = 8080
 * database_url = "postgres://localhost/xfdocs"
 * broadcast_capacity = 256
 * ```
 */

use serde::Deserialize;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::backend::realtime::DEFAULT_CAPACITY;
use crate::backend::server::state::SharedStore;
use crate::backend::store::{MemoryStore, PgStore};
use crate::shared::ConfigError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Resolved server settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub broadcast_capacity: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: None,
            broadcast_capacity: DEFAULT_CAPACITY,
        }
    }
}

impl ServerConfig {
    /// Load from the config file (if any) and the process environment
    pub fn load() -> Self {
        let mut config = match std::env::var("XFDOCS_CONFIG") {
            Ok(path) => match Self::from_file(&path) {
                Ok(config) => {
                    tracing::info!("Loaded configuration from {}", path);
                    config
                }
                Err(e) => {
                    tracing::warn!("Ignoring config file {}: {}", path, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Overlay environment variables read through `lookup`
    ///
    /// Unparseable numbers are logged and leave the current value in place.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.host = host;
        }

        if let Some(raw) = lookup("SERVER_PORT") {
            match parse_value::<u16>("SERVER_PORT", &raw) {
                Ok(port) => self.port = port,
                Err(e) => tracing::warn!("{}; using {}", e, self.port),
            }
        }

        if let Some(url) = lookup("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database_url = Some(url);
            }
        }

        if let Some(raw) = lookup("BROADCAST_CAPACITY") {
            match parse_value::<usize>("BROADCAST_CAPACITY", &raw) {
                Ok(capacity) if capacity > 0 => self.broadcast_capacity = capacity,
                Ok(_) => tracing::warn!("BROADCAST_CAPACITY must be positive; using {}", self.broadcast_capacity),
                Err(e) => tracing::warn!("{}; using {}", e, self.broadcast_capacity),
            }
        }
    }

    /// Socket address to bind
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "SERVER_HOST",
                value: self.host.clone(),
            })
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Connect to PostgreSQL and run migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if the connection fails
///
/// Migration failures are logged; the pool is still returned since the
/// schema may already be in place.
pub async fn load_database(database_url: &str) -> Option<PgPool> {
    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Pick the store backend for this configuration
///
/// Falls back to the in-memory store when no database is configured or it
/// cannot be reached.
pub async fn load_store(config: &ServerConfig) -> SharedStore {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Documents will be kept in memory.");
        return Arc::new(MemoryStore::new());
    };

    match load_database(url).await {
        Some(pool) => Arc::new(PgStore::new(pool)),
        None => {
            tracing::warn!("Database unavailable. Documents will be kept in memory.");
            Arc::new(MemoryStore::new())
        }
    }
}
