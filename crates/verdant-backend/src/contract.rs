//! The backend capability contract.
//!
//! This module defines the [`EntityBackend`] trait that all entity-search
//! backends must satisfy, plus the parameter and result types shared by
//! every implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use verdant_core::{GeoFilter, Result, SortOrder};

// ============================================================================
// Capability
// ============================================================================

/// One operation of the backend capability contract.
///
/// Backends self-report which operations they support via
/// [`EntityBackend::capabilities`]. The registry validates the full set at
/// construction so a backend missing an operation is a startup failure,
/// never a mid-request surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Text/field match with optional sort, capped at a limit.
    SearchPaginated,
    /// Geo-proximity filter combined with text/field match.
    FindNearbyPaginated,
    /// Total item count irrespective of query.
    CountAll,
}

impl Capability {
    /// All operations a registered backend must support.
    pub const REQUIRED: [Capability; 3] = [
        Capability::SearchPaginated,
        Capability::FindNearbyPaginated,
        Capability::CountAll,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SearchPaginated => write!(f, "search_paginated"),
            Self::FindNearbyPaginated => write!(f, "find_nearby_paginated"),
            Self::CountAll => write!(f, "count_all"),
        }
    }
}

// ============================================================================
// SearchOptions / SearchPage
// ============================================================================

/// Options for a paginated text search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Maximum items to return. `0` means count-only: the backend returns
    /// no items and only populates the total.
    pub limit: usize,

    /// Field to sort by, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction, meaningful only when `sort_by` is set.
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl SearchOptions {
    /// Create options capped at `limit` items, unsorted.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Sort results by the given field.
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }
}

/// One page of backend results.
///
/// Items are heterogeneous entity records; the orchestrator merges pages
/// from different entity types without inspecting their shape beyond the
/// display-name fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchPage {
    /// Matched entity records, at most `limit` of them.
    pub items: Vec<Value>,

    /// Total number of matches before the limit was applied, when the
    /// backend can report it cheaply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl SearchPage {
    /// A page with no items and no count.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A count-only page, as returned for `limit = 0` queries.
    pub fn count_only(total: u64) -> Self {
        Self {
            items: Vec::new(),
            total: Some(total),
        }
    }

    /// Returns `true` if the page holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// EntityBackend
// ============================================================================

/// Abstract entity-search backend trait.
///
/// Implementations wrap one entity type's store (a database collection, a
/// remote service, an in-memory fixture). All methods are async because
/// every production backend is I/O-bound.
///
/// # Failure
///
/// Any call may fail; the orchestrator isolates the failure to this
/// backend's registry entry, logs it, and continues with the others.
#[async_trait]
pub trait EntityBackend: Send + Sync {
    /// Match `text` against `search_fields`, optionally sorted, capped at
    /// `options.limit` items.
    ///
    /// Empty `text` matches everything (used by aggregate views). A limit
    /// of `0` must return only count metadata without fetching items, so
    /// count-style queries do not pay full-fetch cost.
    async fn search_paginated(
        &self,
        text: &str,
        search_fields: &[String],
        options: &SearchOptions,
    ) -> Result<SearchPage>;

    /// Geo-proximity filter combined with a text/field match.
    async fn find_nearby_paginated(
        &self,
        geo: &GeoFilter,
        text: &str,
        search_fields: &[String],
        limit: usize,
    ) -> Result<SearchPage>;

    /// Total count of all items irrespective of query.
    async fn count_all(&self) -> Result<u64>;

    /// The operations this backend supports.
    ///
    /// Defaults to the full contract. Backends that proxy a remote service
    /// with a narrower surface report the subset they actually implement,
    /// and registry construction rejects them.
    fn capabilities(&self) -> Vec<Capability> {
        Capability::REQUIRED.to_vec()
    }
}

// ============================================================================
// Tests
// ============================================================================
