//! # Slotbook Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Database implementations (SQLite slot storage)
//! - HTTP client implementations
//! - External service integrations (Google Calendar, OAuth)
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `slotbook-core`
//! - Depends on `slotbook-domain` and `slotbook-core`
//! - Contains all "impure" code (I/O)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::*;
pub use errors::InfraError;
pub use http::*;
pub use integrations::*;
