//! # Slotbook API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - Route handlers (HTTP → scheduling engine bridge)
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Exposes the scheduling engine over an axum router

pub mod context;
pub mod error;
pub mod routes;

// Re-export for convenience
pub use context::*;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
