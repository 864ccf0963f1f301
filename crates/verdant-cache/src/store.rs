//! Cache trait and in-memory implementation.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::policy::{CachePolicy, TtlClass};

/// Namespace-keyed get/set with TTL classes.
///
/// The cache is a best-effort collaborator: `get` and `set` are
/// infallible at this boundary, and an implementation backed by an
/// external store is expected to degrade to a miss (and log) rather than
/// surface its own errors into a search request.
#[async_trait]
pub trait AggregateCache: Send + Sync {
    /// Look up a live value. Expired entries are a miss.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Store a value under the given TTL class, overwriting any previous
    /// entry. Empty values are stored like any other.
    async fn set(&self, key: &str, value: Value, class: TtlClass);
}

struct CacheEntry {
    value: Value,
    expires_at: Instant,
}

/// In-process cache with passive, read-time expiry.
///
/// No eviction thread: an expired entry lingers until the next `get`
/// observes it or the next `set` overwrites it. The key space is a handful
/// of fixed aggregate keys, so unbounded growth is not a concern.
pub struct MemoryCache {
    policy: CachePolicy,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Create a cache with the default TTL policy.
    pub fn new() -> Self {
        Self::with_policy(CachePolicy::default())
    }

    /// Create a cache with an explicit TTL policy.
    pub fn with_policy(policy: CachePolicy) -> Self {
        Self {
            policy,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The policy this cache resolves TTL classes against.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AggregateCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            tracing::debug!(key, "cache entry expired");
            return None;
        }
        Some(entry.value.clone())
    }

    async fn set(&self, key: &str, value: Value, class: TtlClass) {
        let expires_at = Instant::now() + self.policy.resolve(class);
        tracing::debug!(key, class = %class, "cache store");
        self.entries
            .write()
            .await
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn fast_expiry_cache() -> MemoryCache {
        // Sub-second policy so expiry is observable in a test.
        MemoryCache::with_policy(CachePolicy {
            normal_secs: 1,
            degraded_secs: 0,
        })
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let cache = MemoryCache::new();
        cache
            .set("search:popular", json!([{"kind": "market"}]), TtlClass::Normal)
            .await;

        let value = cache.get("search:popular").await.unwrap();
        assert_eq!(value, json!([{"kind": "market"}]));
    }

    #[tokio::test]
    async fn test_missing_key_is_a_miss() {
        let cache = MemoryCache::new();
        assert!(cache.get("search:aggregations").await.is_none());
    }

    #[tokio::test]
    async fn test_empty_value_round_trips_as_hit() {
        let cache = MemoryCache::new();
        cache.set("search:popular", json!([]), TtlClass::Normal).await;

        // An empty list is a cached fact, not a miss.
        let value = cache.get("search:popular").await.unwrap();
        assert_eq!(value, json!([]));
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = fast_expiry_cache();
        cache.set("k", json!(1), TtlClass::Degraded).await;

        // Degraded TTL is zero seconds in this policy.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn test_ttl_class_selects_duration() {
        let cache = fast_expiry_cache();
        cache.set("normal", json!(1), TtlClass::Normal).await;
        cache.set("degraded", json!(1), TtlClass::Degraded).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(cache.get("normal").await.is_some());
        assert!(cache.get("degraded").await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_value() {
        let cache = MemoryCache::new();
        cache.set("k", json!("old"), TtlClass::Normal).await;
        cache.set("k", json!("new"), TtlClass::Normal).await;
        assert_eq!(cache.get("k").await.unwrap(), json!("new"));
    }

    // Compile-time check: the cache is shared across request tasks
    #[test]
    fn test_cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MemoryCache>();
    }
}
