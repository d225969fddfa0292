//! Shared test helpers for `slotbook-core` integration tests.
//!
//! These helpers provide lightweight in-memory port implementations so the
//! scheduling tests can focus on behaviour instead of boilerplate.

pub mod calendar;
pub mod repositories;
