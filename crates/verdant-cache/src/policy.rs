//! Named TTL classes and their resolution to durations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Named cache-expiry policy.
///
/// Call sites pick a class, never a raw duration; the mapping lives in
/// [`CachePolicy`] alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtlClass {
    /// The standard TTL for a fully successful aggregate.
    #[default]
    Normal,
    /// Shortened TTL for an aggregate computed under partial failure,
    /// bounding how long degraded data is served.
    Degraded,
}

impl fmt::Display for TtlClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Degraded => write!(f, "degraded"),
        }
    }
}

/// Resolves [`TtlClass`] values to concrete durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    /// Duration for [`TtlClass::Normal`], in seconds.
    #[serde(default = "default_normal_secs")]
    pub normal_secs: u64,
    /// Duration for [`TtlClass::Degraded`], in seconds.
    #[serde(default = "default_degraded_secs")]
    pub degraded_secs: u64,
}

fn default_normal_secs() -> u64 {
    300
}

fn default_degraded_secs() -> u64 {
    30
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            normal_secs: default_normal_secs(),
            degraded_secs: default_degraded_secs(),
        }
    }
}

impl CachePolicy {
    /// Resolve a class to its configured duration.
    pub fn resolve(&self, class: TtlClass) -> Duration {
        match class {
            TtlClass::Normal => Duration::from_secs(self.normal_secs),
            TtlClass::Degraded => Duration::from_secs(self.degraded_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = CachePolicy::default();
        assert_eq!(policy.resolve(TtlClass::Normal), Duration::from_secs(300));
        assert_eq!(policy.resolve(TtlClass::Degraded), Duration::from_secs(30));
    }

    #[test]
    fn test_degraded_is_shorter_than_normal() {
        let policy = CachePolicy::default();
        assert!(policy.resolve(TtlClass::Degraded) < policy.resolve(TtlClass::Normal));
    }

    #[test]
    fn test_ttl_class_display() {
        assert_eq!(TtlClass::Normal.to_string(), "normal");
        assert_eq!(TtlClass::Degraded.to_string(), "degraded");
    }

    #[test]
    fn test_ttl_class_serialization() {
        assert_eq!(
            serde_json::to_string(&TtlClass::Degraded).unwrap(),
            "\"degraded\""
        );
        let class: TtlClass = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(class, TtlClass::Normal);
    }

    #[test]
    fn test_policy_deserializes_with_defaults() {
        let policy: CachePolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy, CachePolicy::default());
    }
}
