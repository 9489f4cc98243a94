//! Application configuration loaded from environment variables.

use std::net::SocketAddr;

use serde::Deserialize;

use crate::error::KennelError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// Address to bind the HTTP listener to.
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    // === Store Configuration ===
    /// SQLite connection URL (e.g. `sqlite://kennel.sqlite3`).
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum number of pooled store connections.
    #[serde(default = "default_max_connections")]
    pub db_max_connections: u32,

    /// Create missing tables at startup.
    #[serde(default = "default_true")]
    pub auto_init_schema: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8088
}

fn default_database_url() -> String {
    "sqlite://kennel.sqlite3".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: default_database_url(),
            db_max_connections: default_max_connections(),
            auto_init_schema: default_true(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("PORT must be non-zero".to_string());
        }

        if self.db_max_connections == 0 {
            return Err("DB_MAX_CONNECTIONS must be at least 1".to_string());
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err("DATABASE_URL must be a sqlite: URL".to_string());
        }

        Ok(())
    }

    /// Socket address the server should listen on.
    pub fn bind_addr(&self) -> crate::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| KennelError::InvalidConfig(format!("bad bind address: {e}")))
    }
}
