//! The fan-out orchestrator.
//!
//! Every public operation is a variant of "run N backend calls
//! concurrently, merge tolerant of partial failure": a slow or broken
//! entity store must never degrade or block search over the others. The
//! join is all-settled — no first-failure abort, no first-success
//! short-circuit — and per-backend failures are isolated, logged at warn,
//! and excluded from the merge.

use futures::future::join_all;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use verdant_backend::{SearchOptions, SearchPage};
use verdant_cache::{AggregateCache, TtlClass};
use verdant_core::{sanitize_for_log, Error, Result, SortOrder};
use verdant_registry::{EntityRegistry, RegistryEntry};

use crate::query::{EntityCount, EntityHits, SearchQuery};
use crate::tuning::SearchTuning;

/// Cache key for the popular-searches aggregate view.
pub const POPULAR_CACHE_KEY: &str = "search:popular";

/// Cache key for the entity-counts aggregate view.
pub const AGGREGATIONS_CACHE_KEY: &str = "search:aggregations";

/// Field the popular view sorts each featured backend by.
const POPULAR_SORT_FIELD: &str = "rating";

/// Federated search over every registered entity backend.
///
/// Holds the validated registry and the aggregate cache behind `Arc`s;
/// cheap to clone into request handlers.
#[derive(Clone)]
pub struct SearchService {
    registry: Arc<EntityRegistry>,
    cache: Arc<dyn AggregateCache>,
    tuning: SearchTuning,
}

impl SearchService {
    /// Create a service with default tuning.
    pub fn new(registry: Arc<EntityRegistry>, cache: Arc<dyn AggregateCache>) -> Self {
        Self {
            registry,
            cache,
            tuning: SearchTuning::default(),
        }
    }

    /// Replace the tuning configuration.
    pub fn with_tuning(mut self, tuning: SearchTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// The registry this service fans out over.
    pub fn registry(&self) -> &Arc<EntityRegistry> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Public operations
    // ------------------------------------------------------------------

    /// Search every registered entity type concurrently and merge the
    /// successful, non-empty outcomes in registration order.
    ///
    /// With a geo filter the per-backend call is `find_nearby_paginated`,
    /// otherwise `search_paginated`. Entity types with zero matches are
    /// omitted rather than returned as empty placeholders.
    pub async fn unified(&self, query: &SearchQuery) -> Vec<EntityHits> {
        self.record_analytics(&query.text, None);

        let limit = self.tuning.unified_limit;
        let outcomes = join_all(
            self.registry
                .all()
                .iter()
                .map(|entry| async move { (entry, self.dispatch(entry, query, limit).await) }),
        )
        .await;

        let mut merged = Vec::new();
        for (entry, outcome) in outcomes {
            match outcome {
                Ok(page) if !page.is_empty() => merged.push(EntityHits {
                    kind: entry.kind().to_string(),
                    total: page.total,
                    items: page.items,
                }),
                Ok(_) => {}
                Err(reason) => tracing::warn!(
                    entity = entry.kind(),
                    error = %reason,
                    "backend failed during unified search"
                ),
            }
        }
        merged
    }

    /// Collect up to `suggestion_max` distinct display names matching
    /// `text`, in first-occurrence order across registry order.
    ///
    /// Empty text returns an empty list without touching any backend.
    pub async fn suggestions(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let options = SearchOptions::with_limit(self.tuning.suggestion_fetch_limit);
        let outcomes = join_all(self.registry.all().iter().map(|entry| {
            let options = &options;
            async move {
                (
                    entry,
                    entry
                        .backend()
                        .search_paginated(text, entry.search_fields(), options)
                        .await,
                )
            }
        }))
        .await;

        let mut seen = HashSet::new();
        let mut names = Vec::new();
        'outer: for (entry, outcome) in outcomes {
            let page = match outcome {
                Ok(page) => page,
                Err(reason) => {
                    tracing::warn!(
                        entity = entry.kind(),
                        error = %reason,
                        "backend failed during suggestion fan-out"
                    );
                    continue;
                }
            };
            for item in &page.items {
                if let Some(name) = display_name(entry, item) {
                    if seen.insert(name.clone()) {
                        names.push(name);
                        if names.len() >= self.tuning.suggestion_max {
                            break 'outer;
                        }
                    }
                }
            }
        }
        names
    }

    /// Search exactly one entity type, resolved case/plural-insensitively.
    ///
    /// The result echoes the caller's original spelling in its `kind`
    /// field. An unresolvable name is a client error.
    pub async fn by_resource_type(
        &self,
        requested: &str,
        query: &SearchQuery,
    ) -> Result<EntityHits> {
        let entry = self
            .registry
            .resolve(requested)
            .ok_or_else(|| Error::unknown_resource_type(requested))?;

        self.record_analytics(&query.text, Some(requested));

        let page = self
            .dispatch(entry, query, self.tuning.resource_limit)
            .await?;
        Ok(EntityHits {
            kind: requested.to_string(),
            total: page.total,
            items: page.items,
        })
    }

    /// Top-rated items across the featured entity types, cache-checked.
    ///
    /// On a miss the fan-out queries only featured entries, empty text,
    /// sorted by rating descending. The merged result is cached with the
    /// normal TTL class even when every backend failed: "no popular data"
    /// is a valid state, and caching it keeps an outage from triggering a
    /// full fan-out on every request.
    pub async fn popular(&self) -> Result<Vec<EntityHits>> {
        if let Some(value) = self.cache.get(POPULAR_CACHE_KEY).await {
            return Ok(serde_json::from_value(value)?);
        }

        let featured = self.registry.featured();
        let options = SearchOptions::with_limit(self.tuning.popular_limit)
            .sorted_by(POPULAR_SORT_FIELD, SortOrder::Desc);

        let outcomes = join_all(featured.iter().map(|entry| {
            let entry = *entry;
            let options = &options;
            async move {
                (
                    entry,
                    entry
                        .backend()
                        .search_paginated("", entry.search_fields(), options)
                        .await,
                )
            }
        }))
        .await;

        let mut merged = Vec::new();
        let mut failures = 0usize;
        for (entry, outcome) in outcomes {
            match outcome {
                Ok(page) if !page.is_empty() => merged.push(EntityHits {
                    kind: entry.kind().to_string(),
                    total: page.total,
                    items: page.items,
                }),
                Ok(_) => {}
                Err(reason) => {
                    failures += 1;
                    tracing::warn!(
                        entity = entry.kind(),
                        error = %reason,
                        "backend failed during popular fan-out"
                    );
                }
            }
        }

        if !featured.is_empty() && failures == featured.len() {
            tracing::warn!("all featured backends failed; caching empty popular result");
        }

        self.cache
            .set(
                POPULAR_CACHE_KEY,
                serde_json::to_value(&merged)?,
                TtlClass::Normal,
            )
            .await;
        Ok(merged)
    }

    /// Item counts per entity type (keyed by plural), cache-checked.
    ///
    /// A failed entry's count defaults to `0`. When every backend fails
    /// the operation raises [`Error::AggregationUnavailable`] and caches
    /// nothing; when some fail the partial map is cached with the
    /// degraded (short) TTL class so recovering backends are re-probed
    /// sooner.
    pub async fn aggregations(&self) -> Result<Vec<EntityCount>> {
        if let Some(value) = self.cache.get(AGGREGATIONS_CACHE_KEY).await {
            return Ok(serde_json::from_value(value)?);
        }

        let entries = self.registry.all();
        let outcomes =
            join_all(entries.iter().map(|entry| entry.backend().count_all())).await;

        let mut failures = 0usize;
        let counts: Vec<EntityCount> = entries
            .iter()
            .zip(outcomes)
            .map(|(entry, outcome)| {
                let count = match outcome {
                    Ok(count) => count,
                    Err(reason) => {
                        failures += 1;
                        tracing::warn!(
                            entity = entry.kind(),
                            error = %reason,
                            "backend failed during count aggregation"
                        );
                        0
                    }
                };
                EntityCount {
                    plural: entry.plural().to_string(),
                    count,
                }
            })
            .collect();

        if !entries.is_empty() && failures == entries.len() {
            tracing::error!("every backend failed during count aggregation");
            return Err(Error::AggregationUnavailable);
        }

        let class = if failures > 0 {
            tracing::warn!(failures, total = entries.len(), "caching partial aggregation");
            TtlClass::Degraded
        } else {
            TtlClass::Normal
        };
        self.cache
            .set(AGGREGATIONS_CACHE_KEY, serde_json::to_value(&counts)?, class)
            .await;
        Ok(counts)
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// One per-backend call: geo-aware dispatch between the two paginated
    /// contract operations.
    async fn dispatch(
        &self,
        entry: &RegistryEntry,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<SearchPage> {
        match &query.geo {
            Some(geo) => {
                entry
                    .backend()
                    .find_nearby_paginated(geo, &query.text, entry.search_fields(), limit)
                    .await
            }
            None => {
                entry
                    .backend()
                    .search_paginated(
                        &query.text,
                        entry.search_fields(),
                        &SearchOptions::with_limit(limit),
                    )
                    .await
            }
        }
    }

    /// Best-effort analytics line for a raw user query.
    ///
    /// Runs on an independent task the caller never awaits; the query text
    /// and the resource label are sanitized separately before the line is
    /// emitted.
    fn record_analytics(&self, text: &str, resource: Option<&str>) {
        let query = sanitize_for_log(text);
        let resource = resource.map(sanitize_for_log);
        tokio::spawn(async move {
            match resource {
                Some(resource) => {
                    tracing::info!(target: "verdant::analytics", %query, %resource, "search")
                }
                None => tracing::info!(target: "verdant::analytics", %query, "search"),
            }
        });
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("entities", &self.registry.len())
            .field("tuning", &self.tuning)
            .finish()
    }
}

/// Extract a display name from a record using the entry's name-field
/// precedence list. The first field holding a non-empty string wins.
fn display_name(entry: &RegistryEntry, item: &Value) -> Option<String> {
    entry
        .name_fields()
        .iter()
        .filter_map(|field| item.get(field).and_then(Value::as_str))
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

// ============================================================================
// Tests
// ============================================================================
