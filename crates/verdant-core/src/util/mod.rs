//! Shared utilities.

pub mod sanitize;
