//! Orchestrator tuning knobs.

use serde::{Deserialize, Serialize};
use verdant_cache::CachePolicy;

/// Tuning configuration for the search orchestrator.
///
/// Every field has a sensible default, so a partial (or absent) config
/// section deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchTuning {
    /// Per-backend item cap for unified search.
    #[serde(default = "default_unified_limit")]
    pub unified_limit: usize,

    /// Per-backend item cap for single-resource-type search.
    #[serde(default = "default_resource_limit")]
    pub resource_limit: usize,

    /// Per-backend fetch cap while gathering suggestions. Kept small to
    /// bound latency and payload size.
    #[serde(default = "default_suggestion_fetch_limit")]
    pub suggestion_fetch_limit: usize,

    /// Maximum suggestions returned to the caller.
    #[serde(default = "default_suggestion_max")]
    pub suggestion_max: usize,

    /// Item cap per featured backend in the popular view.
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,

    /// TTL policy for the aggregate cache.
    #[serde(default)]
    pub cache: CachePolicy,
}

fn default_unified_limit() -> usize {
    5
}

fn default_resource_limit() -> usize {
    20
}

fn default_suggestion_fetch_limit() -> usize {
    2
}

fn default_suggestion_max() -> usize {
    10
}

fn default_popular_limit() -> usize {
    5
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            unified_limit: default_unified_limit(),
            resource_limit: default_resource_limit(),
            suggestion_fetch_limit: default_suggestion_fetch_limit(),
            suggestion_max: default_suggestion_max(),
            popular_limit: default_popular_limit(),
            cache: CachePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let tuning = SearchTuning::default();
        assert_eq!(tuning.unified_limit, 5);
        assert_eq!(tuning.resource_limit, 20);
        assert_eq!(tuning.suggestion_fetch_limit, 2);
        assert_eq!(tuning.suggestion_max, 10);
        assert_eq!(tuning.popular_limit, 5);
    }

    #[test]
    fn test_deserializes_from_empty_object() {
        let tuning: SearchTuning = serde_json::from_str("{}").unwrap();
        assert_eq!(tuning.unified_limit, SearchTuning::default().unified_limit);
    }

    #[test]
    fn test_partial_override() {
        let tuning: SearchTuning =
            serde_json::from_str(r#"{"unified_limit": 3, "cache": {"normal_secs": 60}}"#)
                .unwrap();
        assert_eq!(tuning.unified_limit, 3);
        assert_eq!(tuning.cache.normal_secs, 60);
        assert_eq!(tuning.resource_limit, 20);
    }
}
