//! Fan-out search orchestration for Verdant.
//!
//! A single query fans out concurrently to every registered entity
//! backend and the per-backend outcomes are merged under partial-failure
//! isolation: one slow or broken store never blocks or corrupts the
//! others' results. The two whole-registry aggregate views are cached
//! with a failure-aware TTL policy.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      verdant-search                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchService — the five public operations                 │
//! │  ├── unified            (all entries, merge non-empty)      │
//! │  ├── suggestions        (display names, deduped, capped)    │
//! │  ├── by_resource_type   (one resolved entry)                │
//! │  ├── popular            (featured entries, cached)          │
//! │  └── aggregations       (counts per plural, cached)         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SearchQuery / EntityHits / EntityCount                     │
//! │  SearchTuning — limits and cache TTL policy                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Failure semantics
//!
//! All fan-outs use an all-settled join: every backend call runs to
//! completion (success or failure) with no short-circuit in either
//! direction. Per-backend failures are logged at warn and excluded from
//! the merge; they escalate to the caller only when every backend of an
//! aggregate operation fails, and then only for the counts view —
//! an all-failed popular view is an empty (and cacheable) result.

pub mod query;
pub mod service;
pub mod tuning;

// Re-exports
pub use query::{EntityCount, EntityHits, SearchQuery};
pub use service::{SearchService, AGGREGATIONS_CACHE_KEY, POPULAR_CACHE_KEY};
pub use tuning::SearchTuning;
