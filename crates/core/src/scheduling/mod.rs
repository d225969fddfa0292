//! Slot scheduling
//!
//! Enumerates appointment slots for a booking request and orchestrates
//! their persistence and calendar mirroring.

pub mod ports;
pub mod slots;

mod service;

pub use service::SchedulingService;
