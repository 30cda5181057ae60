//! Integration test utilities for the reactions API
//!
//! Spawns the real router over the in-memory backend and talks to it over
//! HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
