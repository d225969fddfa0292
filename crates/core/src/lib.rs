//! # Slotbook Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Slot enumeration (daily offsets and the date-range walk)
//! - Port/adapter interfaces (traits)
//! - The scheduling orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `slotbook-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use scheduling::ports::{CalendarSync, SlotRepository};
pub use scheduling::slots::{daily_slot_offsets, SlotWalk};
pub use scheduling::SchedulingService;
