//! The validated entity registry.

use std::collections::HashSet;
use verdant_backend::Capability;
use verdant_core::{Error, Result};

use crate::entry::RegistryEntry;

/// Static table of registered entity types, validated once at startup.
///
/// Construction checks every backend against the capability contract and
/// rejects duplicates; after that the registry is immutable and safe to
/// share behind an `Arc`.
pub struct EntityRegistry {
    entries: Vec<RegistryEntry>,
}

impl EntityRegistry {
    /// Build a registry from a fixed list of registrations.
    ///
    /// Fails with a configuration error when a backend does not report the
    /// full capability contract (naming the offending type and every
    /// missing operation) or when two entries share a name. This runs at
    /// process start; callers must treat a failure as fatal.
    pub fn new(entries: Vec<RegistryEntry>) -> Result<Self> {
        let mut shortfalls: Vec<String> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for entry in &entries {
            for name in [entry.kind(), entry.plural()] {
                if !seen.insert(name.to_string()) {
                    return Err(Error::config(format!(
                        "duplicate entity name '{name}' in registry"
                    )));
                }
            }

            let reported = entry.backend().capabilities();
            let missing: Vec<String> = Capability::REQUIRED
                .iter()
                .filter(|cap| !reported.contains(cap))
                .map(|cap| cap.to_string())
                .collect();
            if !missing.is_empty() {
                shortfalls.push(format!(
                    "backend for entity type '{}' is missing required operations: {}",
                    entry.kind(),
                    missing.join(", ")
                ));
            }
        }

        if !shortfalls.is_empty() {
            return Err(Error::config(shortfalls.join("; ")));
        }

        tracing::info!(entries = entries.len(), "entity registry validated");
        Ok(Self { entries })
    }

    /// Case-insensitive lookup by singular or plural name.
    ///
    /// Returns `None` for unknown names; unknown-type handling is the
    /// caller's responsibility (it surfaces as a client error, not a
    /// server error).
    pub fn resolve(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.answers_to(name))
    }

    /// All entries, in registration order.
    pub fn all(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// The featured subset, in registration order.
    pub fn featured(&self) -> Vec<&RegistryEntry> {
        self.entries.iter().filter(|e| e.is_featured()).collect()
    }

    /// Number of registered entity types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entity types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for EntityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityRegistry")
            .field(
                "kinds",
                &self.entries.iter().map(RegistryEntry::kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
