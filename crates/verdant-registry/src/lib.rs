//! Entity registry for Verdant.
//!
//! The registry is the single source of truth mapping entity type →
//! backend + search metadata. It is built once at process start from a
//! fixed list of registrations; construction validates every backend
//! against the capability contract and fails fast on any shortfall, so a
//! broken backend is a startup error rather than a mid-request surprise.
//!
//! Lookups accept both the canonical singular type name and its fixed
//! plural form, case-insensitively. Iteration preserves registration
//! order, which downstream failure logging relies on.

pub mod entry;
pub mod registry;

// Re-exports
pub use entry::RegistryEntry;
pub use registry::EntityRegistry;
