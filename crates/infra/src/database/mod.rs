//! Database implementations

pub mod manager;
pub mod slot_repository;

pub use manager::*;
pub use slot_repository::*;
