//! Filtering options.
//!
//! `FilterOptions` can be built in code with the `with_*` methods or
//! deserialized from a caller's configuration file. Missing fields take
//! their defaults.

use serde::{Deserialize, Serialize};

/// How a predicate set is applied to candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Keep a candidate if any predicate matches (OR) instead of all (AND)
    pub satisfy_any: bool,

    /// With no predicates, yield nothing instead of every candidate
    pub empty_predicates_yield_empty: bool,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure OR (true) or AND (false) combination (default: AND)
    pub fn with_satisfy_any(mut self, satisfy_any: bool) -> Self {
        self.satisfy_any = satisfy_any;
        self
    }

    /// Configure the result for an empty predicate set (default: pass everything through)
    pub fn with_empty_predicates_yield_empty(mut self, yield_empty: bool) -> Self {
        self.empty_predicates_yield_empty = yield_empty;
        self
    }
}
