//! Application configuration structures

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub calendar: CalendarConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: String,
    /// Maximum connections in the pool.
    pub pool_size: u32,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Google Calendar connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// OAuth2 client id of the Google Cloud project.
    pub client_id: String,
    /// OAuth2 client secret. Never serialized back out.
    #[serde(skip_serializing)]
    pub client_secret: Option<String>,
    /// Redirect URI registered for the OAuth2 client.
    pub redirect_uri: String,
    /// Override for the Calendar API base URL. Defaults to the public
    /// Google endpoint when unset.
    pub api_base: Option<String>,
    /// Override for the OAuth2 token endpoint. Defaults to the public
    /// Google endpoint when unset.
    pub token_endpoint: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            calendar: CalendarConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "slotbook.db".to_string(),
            pool_size: 8,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: None,
            redirect_uri: "http://localhost:8080/api/auth/google/callback".to_string(),
            api_base: None,
            token_endpoint: None,
        }
    }
}
