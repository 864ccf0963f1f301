//! In-memory linear-scan backend.
//!
//! Stores entity records in memory and scans them on every call. Used for
//! fixtures, demos, and as a reference implementation of the contract;
//! production backends wrap real stores.
//!
//! # Limitations
//!
//! - O(n) per query
//! - Substring matching only, no stemming or relevance scoring
//! - All records must fit in memory

use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use verdant_core::{GeoFilter, Result, SortOrder};

use crate::contract::{Capability, EntityBackend, SearchOptions, SearchPage};

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Brute-force in-memory entity backend.
pub struct MemoryBackend {
    records: Vec<Value>,
    capabilities: Vec<Capability>,
}

impl MemoryBackend {
    /// Create an empty backend supporting the full contract.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            capabilities: Capability::REQUIRED.to_vec(),
        }
    }

    /// Create a backend seeded with the given records.
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records,
            capabilities: Capability::REQUIRED.to_vec(),
        }
    }

    /// Restrict the self-reported capability set.
    ///
    /// Registry construction rejects backends that report less than the
    /// full contract; this hook exists for proxies with a narrower surface
    /// and for exercising that rejection.
    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Append records to the backend.
    pub fn add_records(&mut self, records: Vec<Value>) {
        self.records.extend(records);
    }

    /// Case-insensitive substring match of `text` against the record's
    /// values for `search_fields`. Empty text matches every record.
    fn matches(record: &Value, text: &str, search_fields: &[String]) -> bool {
        if text.is_empty() {
            return true;
        }
        let needle = text.to_lowercase();
        search_fields.iter().any(|field| {
            record
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|v| v.to_lowercase().contains(&needle))
        })
    }

    /// Compare two records by a field. Numbers compare numerically, strings
    /// lexicographically; records missing the field sort last.
    fn compare_by_field(a: &Value, b: &Value, field: &str) -> Ordering {
        match (a.get(field), b.get(field)) {
            (Some(x), Some(y)) => match (x.as_f64(), y.as_f64()) {
                (Some(xf), Some(yf)) => xf.partial_cmp(&yf).unwrap_or(Ordering::Equal),
                _ => x
                    .as_str()
                    .unwrap_or_default()
                    .cmp(y.as_str().unwrap_or_default()),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Great-circle distance between two coordinate pairs, in meters.
    fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let d_lat = (lat2 - lat1).to_radians();
        let d_lon = (lon2 - lon1).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_METERS * a.sqrt().asin()
    }

    fn record_coordinates(record: &Value) -> Option<(f64, f64)> {
        let lat = record.get("latitude").and_then(Value::as_f64)?;
        let lon = record.get("longitude").and_then(Value::as_f64)?;
        Some((lat, lon))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EntityBackend for MemoryBackend {
    async fn search_paginated(
        &self,
        text: &str,
        search_fields: &[String],
        options: &SearchOptions,
    ) -> Result<SearchPage> {
        tracing::debug!(
            text,
            limit = options.limit,
            records = self.records.len(),
            "memory backend scan"
        );

        let mut matched: Vec<&Value> = self
            .records
            .iter()
            .filter(|r| Self::matches(r, text, search_fields))
            .collect();

        if let Some(ref field) = options.sort_by {
            matched.sort_by(|a, b| {
                let ordering = Self::compare_by_field(a, b, field);
                match options.sort_order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        let total = matched.len() as u64;
        if options.limit == 0 {
            return Ok(SearchPage::count_only(total));
        }

        let items = matched
            .into_iter()
            .take(options.limit)
            .cloned()
            .collect();
        Ok(SearchPage {
            items,
            total: Some(total),
        })
    }

    async fn find_nearby_paginated(
        &self,
        geo: &GeoFilter,
        text: &str,
        search_fields: &[String],
        limit: usize,
    ) -> Result<SearchPage> {
        let matched: Vec<&Value> = self
            .records
            .iter()
            .filter(|r| {
                Self::record_coordinates(r).is_some_and(|(lat, lon)| {
                    Self::haversine_meters(geo.latitude, geo.longitude, lat, lon)
                        <= geo.radius_meters
                })
            })
            .filter(|r| Self::matches(r, text, search_fields))
            .collect();

        let total = matched.len() as u64;
        let items = matched.into_iter().take(limit).cloned().collect();
        Ok(SearchPage {
            items,
            total: Some(total),
        })
    }

    async fn count_all(&self) -> Result<u64> {
        Ok(self.records.len() as u64)
    }

    fn capabilities(&self) -> Vec<Capability> {
        self.capabilities.clone()
    }
}

impl std::fmt::Debug for MemoryBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("records", &self.records.len())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
