//! Error types for the criteria crate.
//!
//! Only registry-backed resolution can fail. Candidate filtering never
//! raises an error: absent inputs are treated as empty sequences or sets.

use thiserror::Error;

/// Fatal errors raised while resolving criteria into predicates.
///
/// A registry returns one of these from a lookup; the extractor propagates
/// it unchanged and discards whatever it had accumulated so far.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// The registry recognised the criterion but could not build a predicate for it
    #[error("Failed to resolve predicate for criterion {criterion}: {reason}")]
    LookupFailed { criterion: String, reason: String },

    /// The registry cannot serve lookups at all
    #[error("Predicate registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Failure reported by a collaborator the registry delegates to
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ResolverError {
    /// Shorthand for [`ResolverError::LookupFailed`] using the criterion's `Debug` form.
    pub fn lookup_failed(criterion: &impl std::fmt::Debug, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            criterion: format!("{:?}", criterion),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ResolverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_message() {
        let err = ResolverError::lookup_failed(&"min-rating", "threshold out of range");
        assert_eq!(
            err.to_string(),
            "Failed to resolve predicate for criterion \"min-rating\": threshold out of range"
        );
    }

    #[test]
    fn test_anyhow_is_transparent() {
        let err: ResolverError = anyhow::anyhow!("backing store closed").into();
        assert!(matches!(err, ResolverError::Other(_)));
        assert_eq!(err.to_string(), "backing store closed");
    }
}
