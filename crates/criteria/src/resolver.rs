//! The CandidateResolver runs extraction and filtering back to back.
//!
//! This module provides the builder that resolver implementations use to
//! select the candidates matching a criteria collection in one call.

use crate::candidate_filter::{filter_with, Filtered};
use crate::config::FilterOptions;
use crate::error::Result;
use crate::extractor::PredicateExtractor;
use crate::traits::{CriteriaSet, DirectPredicate, PredicateRegistry};
use std::borrow::Borrow;
use tracing::{debug, instrument};

/// Selects the candidates matching a criteria collection.
///
/// Holds only borrowed collaborators and copyable options, so one resolver
/// can serve any number of independent calls.
///
/// ## Usage
/// ```ignore
/// let resolver = CandidateResolver::<Condition, Movie>::new()
///     .with_direct(&CriterionCapability)
///     .with_registry(&registry)
///     .with_options(FilterOptions::new().with_satisfy_any(true));
///
/// let matching: Vec<Movie> = resolver.resolve(Some(&criteria), Some(movies))?.collect();
/// ```
pub struct CandidateResolver<'a, C, T: ?Sized> {
    extractor: PredicateExtractor<'a, C, T>,
    options: FilterOptions,
}

impl<'a, C, T: ?Sized> CandidateResolver<'a, C, T> {
    /// Create a resolver with no direct capability, no registry and default options.
    pub fn new() -> Self {
        Self {
            extractor: PredicateExtractor::new(),
            options: FilterOptions::default(),
        }
    }

    /// Accept criteria that the capability narrows to a predicate (builder pattern).
    pub fn with_direct(mut self, capability: &'a dyn DirectPredicate<C, T>) -> Self {
        self.extractor = self.extractor.with_direct(capability);
        self
    }

    /// Resolve remaining criteria through `registry` (builder pattern).
    pub fn with_registry(mut self, registry: &'a dyn PredicateRegistry<C, T>) -> Self {
        self.extractor = self.extractor.with_registry(registry);
        self
    }

    /// Replace the filtering options (builder pattern).
    pub fn with_options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Extract predicates from `criteria` and lazily filter `candidates`.
    ///
    /// ## Algorithm
    /// 1. Extract the predicate set; a registry error is returned before
    ///    any candidate is touched
    /// 2. Log the predicate count and the options in effect
    /// 3. Return the lazy filtered sequence
    ///
    /// # Returns
    /// * `Ok(Filtered)` - The matching candidates, evaluated on demand
    /// * `Err` - If the registry failed during extraction
    #[instrument(level = "debug", skip_all)]
    pub fn resolve<I>(
        &self,
        criteria: Option<&(impl CriteriaSet<C> + ?Sized)>,
        candidates: Option<I>,
    ) -> Result<Filtered<I::IntoIter, T>>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let predicates = self.extractor.extract(criteria)?;
        debug!(
            "Resolved {} predicates (satisfy_any: {}, empty_predicates_yield_empty: {})",
            predicates.len(),
            self.options.satisfy_any,
            self.options.empty_predicates_yield_empty
        );
        Ok(filter_with(candidates, Some(predicates), &self.options))
    }
}

impl<C, T: ?Sized> Default for CandidateResolver<'_, C, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, T: ?Sized> Clone for CandidateResolver<'_, C, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, T: ?Sized> Copy for CandidateResolver<'_, C, T> {}
