//! Error types for the Verdant search layer.

/// Errors that can occur while assembling or serving federated search.
///
/// All error variants are marked with `#[non_exhaustive]` to allow
/// adding new error types without breaking changes.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Registry configuration error (startup only, fatal).
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong with the registration
        message: String,
    },

    /// The caller asked for an entity type the registry does not know.
    #[error("Unknown resource type: {requested}")]
    UnknownResourceType {
        /// The name the caller supplied, verbatim
        requested: String,
    },

    /// A geo filter was supplied with a partial or non-finite coordinate pair.
    #[error("Invalid geo filter: {message}")]
    InvalidGeoFilter {
        /// What made the pair unusable
        message: String,
    },

    /// A single backend failed during fan-out.
    #[error("Backend '{kind}' failed: {message}")]
    Backend {
        /// Entity kind whose backend failed
        kind: String,
        /// Failure reason as reported by the backend
        message: String,
    },

    /// Every backend failed while computing entity counts.
    #[error("Unable to fetch aggregations across all services")]
    AggregationUnavailable,

    /// JSON encode/decode error (cache values, record fields).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience `Result` type alias for Verdant operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether this error is the caller's fault.
    ///
    /// Client errors are surfaced synchronously and never retried;
    /// everything else is a server-side condition.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::UnknownResourceType { .. } => true,
            Error::InvalidGeoFilter { .. } => true,
            Error::Config { .. } => false,
            Error::Backend { .. } => false,
            Error::AggregationUnavailable => false,
            Error::Serialization(_) => false,
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Creates a new unknown-resource-type error, preserving the caller's spelling.
    pub fn unknown_resource_type<S: Into<String>>(requested: S) -> Self {
        Error::UnknownResourceType {
            requested: requested.into(),
        }
    }

    /// Creates a new invalid-geo-filter error.
    pub fn invalid_geo<S: Into<String>>(message: S) -> Self {
        Error::InvalidGeoFilter {
            message: message.into(),
        }
    }

    /// Creates a new backend failure error for the given entity kind.
    pub fn backend<K, M>(kind: K, message: M) -> Self
    where
        K: Into<String>,
        M: Into<String>,
    {
        Error::Backend {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("duplicate entity kind 'market'");
        assert_eq!(
            err.to_string(),
            "Configuration error: duplicate entity kind 'market'"
        );
    }

    #[test]
    fn test_unknown_resource_type_preserves_spelling() {
        let err = Error::unknown_resource_type("Restaraunts");
        assert_eq!(err.to_string(), "Unknown resource type: Restaraunts");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(Error::unknown_resource_type("x").is_client_error());
        assert!(Error::invalid_geo("latitude without longitude").is_client_error());
        assert!(!Error::config("x").is_client_error());
        assert!(!Error::backend("doctor", "timeout").is_client_error());
        assert!(!Error::AggregationUnavailable.is_client_error());
    }

    #[test]
    fn test_backend_error_names_entity() {
        let err = Error::backend("sanctuary", "connection refused");
        assert_eq!(
            err.to_string(),
            "Backend 'sanctuary' failed: connection refused"
        );
    }

    #[test]
    fn test_aggregation_unavailable_display() {
        assert_eq!(
            Error::AggregationUnavailable.to_string(),
            "Unable to fetch aggregations across all services"
        );
    }

    #[test]
    fn test_serde_error_converts() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{nope}").unwrap_err();
        let err: Error = serde_err.into();
        assert!(!err.is_client_error());
        assert!(err.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_error_implements_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
