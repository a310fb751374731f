//! Predicate extraction and lazy candidate filtering for resolvers.
//!
//! This crate provides:
//! - Traits for criteria collections, predicates, direct-predicate capabilities
//!   and predicate registries
//! - `extract_predicates` / `PredicateExtractor` for turning criteria into
//!   an identity-deduplicated `PredicateSet`
//! - `filter` for combining a predicate set with AND/OR semantics and
//!   lazily filtering a candidate sequence
//! - `CandidateResolver` for running both stages in one call
//!
//! ## Architecture
//! Resolution happens in two stages:
//! 1. Each criterion becomes a predicate, either directly (the criterion is
//!    itself a predicate) or through a registry lookup
//! 2. The predicates are folded into one and candidates are pulled through
//!    it on demand
//!
//! Neither stage keeps state between calls.
//!
//! ## Example Usage
//! ```ignore
//! use criteria::{CandidateResolver, CriterionCapability, FilterOptions};
//!
//! let resolver = CandidateResolver::<Condition, Movie>::new()
//!     .with_direct(&CriterionCapability)
//!     .with_registry(&registry)
//!     .with_options(FilterOptions::new().with_satisfy_any(true));
//!
//! let matching: Vec<Movie> = resolver.resolve(Some(&criteria), Some(movies))?.collect();
//! ```

pub mod candidate_filter;
pub mod config;
pub mod error;
pub mod extractor;
pub mod predicate;
pub mod resolver;
pub mod traits;

// Re-export main types
pub use candidate_filter::{filter, filter_with, CombinedPredicate, Combinator, Filtered};
pub use config::FilterOptions;
pub use error::{ResolverError, Result};
pub use extractor::{extract_predicates, PredicateExtractor};
pub use predicate::{PredicateSet, SharedPredicate};
pub use resolver::CandidateResolver;
pub use traits::{
    CriteriaSet, Criterion, CriterionCapability, DirectPredicate, Predicate, PredicateRegistry,
};
