//! Entity backend contract for Verdant.
//!
//! Every searchable entity store (restaurants, markets, sanctuaries, ...)
//! implements [`EntityBackend`] so the fan-out orchestrator can treat all
//! backends uniformly. The contract is deliberately minimal:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     verdant-backend                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  EntityBackend trait — the capability contract              │
//! │  ├── search_paginated    (text/field match, sortable)       │
//! │  ├── find_nearby_paginated (geo + text/field match)         │
//! │  └── count_all           (total item count)                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Capability — self-reported operation set for startup       │
//! │  validation (a proxy backend may support a subset)          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MemoryBackend — linear-scan reference implementation       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A backend may fail any call with any internal error; the orchestrator
//! makes no assumption about error shape beyond "it is an error".

pub mod contract;
pub mod memory;

// Re-exports
pub use contract::{Capability, EntityBackend, SearchOptions, SearchPage};
pub use memory::MemoryBackend;
