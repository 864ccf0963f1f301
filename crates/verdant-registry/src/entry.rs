//! One registered entity type.

use std::sync::Arc;
use verdant_backend::EntityBackend;

/// One searchable entity type bound to its backend and search metadata.
///
/// The plural is a fixed per-type mapping set at registration, not derived
/// by string concatenation — at least one type's plural is irregular
/// (`sanctuary` → `sanctuaries`). The backend is shared ownership: the
/// registry borrows it for the process lifetime, it does not manage the
/// backend's lifecycle.
///
/// # Example
///
/// ```rust,ignore
/// let entry = RegistryEntry::new("restaurant", "restaurants", backend)
///     .with_search_fields(&["name", "description", "cuisine"])
///     .with_name_fields(&["name"])
///     .featured(true);
/// ```
#[derive(Clone)]
pub struct RegistryEntry {
    kind: String,
    plural: String,
    backend: Arc<dyn EntityBackend>,
    search_fields: Vec<String>,
    name_fields: Vec<String>,
    featured: bool,
}

impl RegistryEntry {
    /// Create an entry for the given singular/plural pair.
    ///
    /// Both names are stored in their canonical lower-case form.
    pub fn new(
        kind: impl Into<String>,
        plural: impl Into<String>,
        backend: Arc<dyn EntityBackend>,
    ) -> Self {
        Self {
            kind: kind.into().to_lowercase(),
            plural: plural.into().to_lowercase(),
            backend,
            search_fields: Vec::new(),
            name_fields: Vec::new(),
            featured: false,
        }
    }

    /// Set the ordered field names the backend matches query text against.
    pub fn with_search_fields(mut self, fields: &[&str]) -> Self {
        self.search_fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the display-name precedence list used by suggestion extraction.
    pub fn with_name_fields(mut self, fields: &[&str]) -> Self {
        self.name_fields = fields.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Mark whether this entry participates in "popular" aggregate views.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// Canonical singular type name.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Fixed plural form of the type name.
    pub fn plural(&self) -> &str {
        &self.plural
    }

    /// The capability-checked backend serving this entity type.
    pub fn backend(&self) -> &Arc<dyn EntityBackend> {
        &self.backend
    }

    /// Ordered field names to match query text against.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Display-name field precedence for suggestions.
    pub fn name_fields(&self) -> &[String] {
        &self.name_fields
    }

    /// Whether this entry participates in popular views.
    pub fn is_featured(&self) -> bool {
        self.featured
    }

    /// Whether `name` refers to this entry, singular or plural,
    /// case-insensitively.
    pub fn answers_to(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        lowered == self.kind || lowered == self.plural
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("kind", &self.kind)
            .field("plural", &self.plural)
            .field("search_fields", &self.search_fields)
            .field("featured", &self.featured)
            .finish()
    }
}
