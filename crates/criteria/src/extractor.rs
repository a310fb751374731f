//! Turns a criteria collection into a deduplicated set of predicates.
//!
//! ## Algorithm
//! For each criterion, in the collection's iteration order:
//! 1. If a direct capability is configured and narrows the criterion, keep the
//!    criterion's own predicate. The registry is not consulted.
//! 2. Otherwise, if a registry is configured, look the criterion up and
//!    keep the result. A missing mapping skips the criterion.
//! 3. Otherwise skip the criterion.
//!
//! A registry error aborts the extraction and the partial set is dropped.

use crate::error::Result;
use crate::predicate::PredicateSet;
use crate::traits::{CriteriaSet, DirectPredicate, PredicateRegistry};
use tracing::{debug, instrument, trace};

/// Extract the predicates for `criteria`.
///
/// Absent criteria yield an empty set without touching `direct` or
/// `registry`.
#[instrument(level = "debug", skip_all)]
pub fn extract_predicates<C, T: ?Sized>(
    criteria: Option<&(impl CriteriaSet<C> + ?Sized)>,
    direct: Option<&dyn DirectPredicate<C, T>>,
    registry: Option<&dyn PredicateRegistry<C, T>>,
) -> Result<PredicateSet<T>> {
    let Some(criteria) = criteria else {
        trace!("No criteria supplied");
        return Ok(PredicateSet::new());
    };

    debug!("Extracting predicates from {} criteria", criteria.size());

    let mut predicates = PredicateSet::new();
    for (position, criterion) in criteria.criteria().enumerate() {
        if let Some(predicate) = direct.and_then(|capability| capability.narrow(criterion)) {
            let added = predicates.insert(predicate);
            trace!(position, added, "Criterion is a direct predicate");
            continue;
        }

        let Some(registry) = registry else {
            trace!(position, "Criterion skipped: no direct match and no registry");
            continue;
        };

        let found = registry.lookup(criterion).inspect_err(|err| {
            debug!(position, error = %err, "Registry lookup failed, aborting extraction");
        })?;

        match found {
            Some(predicate) => {
                let added = predicates.insert(predicate);
                trace!(position, added, "Criterion resolved through registry");
            }
            None => trace!(position, "Criterion skipped: no registry mapping"),
        }
    }

    debug!("Extracted {} distinct predicates", predicates.len());
    Ok(predicates)
}

/// Reusable extraction settings: an optional direct capability and an optional
/// registry, configured with the builder pattern.
///
/// ## Usage
/// ```ignore
/// let extractor = PredicateExtractor::<Condition, Movie>::new()
///     .with_direct(&CriterionCapability)
///     .with_registry(&registry);
///
/// let predicates = extractor.extract(Some(&criteria))?;
/// ```
pub struct PredicateExtractor<'a, C, T: ?Sized> {
    direct: Option<&'a dyn DirectPredicate<C, T>>,
    registry: Option<&'a dyn PredicateRegistry<C, T>>,
}

impl<'a, C, T: ?Sized> PredicateExtractor<'a, C, T> {
    /// Create an extractor with neither a direct capability nor a registry.
    pub fn new() -> Self {
        Self {
            direct: None,
            registry: None,
        }
    }

    /// Accept criteria that the capability narrows to a predicate.
    pub fn with_direct(mut self, capability: &'a dyn DirectPredicate<C, T>) -> Self {
        self.direct = Some(capability);
        self
    }

    /// Resolve remaining criteria through `registry`.
    pub fn with_registry(mut self, registry: &'a dyn PredicateRegistry<C, T>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn extract(
        &self,
        criteria: Option<&(impl CriteriaSet<C> + ?Sized)>,
    ) -> Result<PredicateSet<T>> {
        extract_predicates(criteria, self.direct, self.registry)
    }
}

impl<C, T: ?Sized> Default for PredicateExtractor<'_, C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T: ?Sized> Clone for PredicateExtractor<'_, C, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T: ?Sized> Copy for PredicateExtractor<'_, C, T> {}
