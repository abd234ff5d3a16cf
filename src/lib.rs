//! Petal cap firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod motion;
pub mod pins;
pub mod proto;
pub mod switches;

// Re-export the ESP-IDF-only modules so the crate compiles; the actual
// implementations are guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;

/// Petals on the cap. Petal ids run 0..PETAL_COUNT everywhere.
pub const PETAL_COUNT: usize = 4;
