//! # Slotbook Domain
//!
//! Business domain types and models for Slotbook.
//!
//! This crate contains:
//! - Booking data types (BookingRequest, SlotOutcome, BookingResult, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Slotbook crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod booking;
pub mod config;
pub mod errors;

// Re-export commonly used items
pub use booking::*;
pub use config::*;
pub use errors::*;
