//! Request and result types for the orchestrator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use verdant_core::GeoFilter;

/// A request-scoped search query.
///
/// The geo filter, when present, has already been validated as a complete
/// finite coordinate pair (see [`GeoFilter::from_parts`]); a partial pair
/// never reaches this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-form query text. Empty means "match all".
    pub text: String,

    /// Optional geo-proximity filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoFilter>,
}

impl SearchQuery {
    /// Create a text-only query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            geo: None,
        }
    }

    /// Attach a geo filter.
    pub fn with_geo(mut self, geo: GeoFilter) -> Self {
        self.geo = Some(geo);
        self
    }
}

/// One entity type's contribution to a merged search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityHits {
    /// Entity type label. For by-resource-type searches this echoes the
    /// caller's original spelling, not the canonical form.
    pub kind: String,

    /// Matched records from this entity's backend.
    pub items: Vec<Value>,

    /// Total matches before the per-backend limit, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

/// One entity type's item count in the aggregations view.
///
/// Counts are keyed by the plural type name and kept as an ordered list so
/// the registry's registration order survives serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCount {
    /// Plural form of the entity type name.
    pub plural: String,

    /// Item count, `0` when the backend failed during the fan-out.
    pub count: u64,
}
