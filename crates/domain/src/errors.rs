//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Slotbook
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotbookError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate slot: {0}")]
    DuplicateSlot(String),

    #[error("Calendar provider error: {0}")]
    Provider(String),

    #[error("Reconciliation error: {0}")]
    Reconciliation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Slotbook operations
pub type Result<T> = std::result::Result<T, SlotbookError>;
