//! Configuration loading
//!
//! Loads application configuration from environment variables, with a
//! fallback to JSON or TOML files probed from standard locations.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
