//! Verdant Core — shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all Verdant
//! crates. It has no internal Verdant dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error taxonomy and Result alias
//! - [`types`]: Geo filter and sort types shared by backends and the orchestrator
//! - [`util`]: Log-sanitization utilities

pub mod error;
pub mod types;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use types::{GeoFilter, SortOrder, DEFAULT_RADIUS_METERS};

// Convenience re-exports from util
pub use util::sanitize::sanitize_for_log;
