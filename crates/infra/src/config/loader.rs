//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `SLOTBOOK_DB_PATH`: Database file path
//! - `SLOTBOOK_DB_POOL_SIZE`: Connection pool size
//! - `SLOTBOOK_SERVER_HOST`: Listen address (default `127.0.0.1`)
//! - `SLOTBOOK_SERVER_PORT`: Listen port (default `8080`)
//! - `SLOTBOOK_GOOGLE_CLIENT_ID`: OAuth2 client id
//! - `SLOTBOOK_GOOGLE_CLIENT_SECRET`: OAuth2 client secret (optional)
//! - `SLOTBOOK_GOOGLE_REDIRECT_URI`: OAuth2 redirect URI
//! - `SLOTBOOK_CALENDAR_API_BASE`: Calendar API base URL override (optional)
//! - `SLOTBOOK_GOOGLE_TOKEN_ENDPOINT`: Token endpoint override (optional)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./slotbook.json` or `./slotbook.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use slotbook_domain::{
    CalendarConfig, Config, DatabaseConfig, Result, ServerConfig, SlotbookError,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `SlotbookError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    // Try loading from environment first
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            // Fall back to file
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Returns `SlotbookError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("SLOTBOOK_DB_PATH")?;
    let db_pool_size = env_var("SLOTBOOK_DB_POOL_SIZE").and_then(|s| {
        s.parse::<u32>().map_err(|e| SlotbookError::Config(format!("Invalid pool size: {}", e)))
    })?;

    let server_host =
        env_opt("SLOTBOOK_SERVER_HOST").unwrap_or_else(|| ServerConfig::default().host);
    let server_port = match env_opt("SLOTBOOK_SERVER_PORT") {
        Some(s) => s
            .parse::<u16>()
            .map_err(|e| SlotbookError::Config(format!("Invalid server port: {}", e)))?,
        None => ServerConfig::default().port,
    };

    let client_id = env_var("SLOTBOOK_GOOGLE_CLIENT_ID")?;
    let client_secret = env_opt("SLOTBOOK_GOOGLE_CLIENT_SECRET");
    let redirect_uri = env_var("SLOTBOOK_GOOGLE_REDIRECT_URI")?;
    let api_base = env_opt("SLOTBOOK_CALENDAR_API_BASE");
    let token_endpoint = env_opt("SLOTBOOK_GOOGLE_TOKEN_ENDPOINT");

    Ok(Config {
        database: DatabaseConfig { path: db_path, pool_size: db_pool_size },
        server: ServerConfig { host: server_host, port: server_port },
        calendar: CalendarConfig {
            client_id,
            client_secret,
            redirect_uri,
            api_base,
            token_endpoint,
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`probe_config_paths`].
///
/// # Errors
/// Returns `SlotbookError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SlotbookError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SlotbookError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SlotbookError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Arguments
/// * `contents` - File contents as string
/// * `path` - Path to the file (for format detection and error messages)
///
/// # Errors
/// Returns `SlotbookError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SlotbookError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SlotbookError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(SlotbookError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches for config files in the following locations (in order):
/// 1. Current working directory (`./config.{json,toml}`,
///    `./slotbook.{json,toml}`)
/// 2. Parent directories (up to 2 levels)
/// 3. Relative to executable location
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    // Try current working directory
    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("slotbook.json"),
            cwd.join("slotbook.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
            cwd.join("../../config.json"),
            cwd.join("../../config.toml"),
        ]);
    }

    // Try relative to executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("slotbook.json"),
                exe_dir.join("slotbook.toml"),
                exe_dir.join("../config.json"),
                exe_dir.join("../config.toml"),
                exe_dir.join("../../config.json"),
                exe_dir.join("../../config.toml"),
            ]);
        }
    }

    // Return first existing candidate
    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `SlotbookError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SlotbookError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Get optional environment variable, treating empty values as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}
