//! Core traits for predicate extraction and candidate filtering.
//!
//! The caller owns every implementor of these traits. The extractor and
//! the filter only read through them and never hold on to them past a call.

use crate::error::Result;
use crate::predicate::SharedPredicate;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// A pure boolean test over a candidate value.
///
/// Implementations must be side-effect free as far as the result is
/// concerned: evaluating the same candidate twice yields the same answer.
/// Any `Fn(&T) -> bool` closure is a predicate.
pub trait Predicate<T: ?Sized> {
    fn evaluate(&self, candidate: &T) -> bool;
}

impl<T: ?Sized, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn evaluate(&self, candidate: &T) -> bool {
        self(candidate)
    }
}

/// A matching condition that may double as a predicate over `T`.
///
/// Criterion types opt into the direct predicate capability by overriding
/// [`Criterion::as_predicate`]. The returned handle must be the criterion's
/// own predicate (a clone of the same [`SharedPredicate`]), so that it
/// deduplicates by identity like any other handle.
pub trait Criterion<T: ?Sized> {
    /// Returns this criterion as a predicate, or `None` if it needs a registry.
    fn as_predicate(&self) -> Option<SharedPredicate<T>> {
        None
    }
}

impl<T: ?Sized> Criterion<T> for SharedPredicate<T> {
    fn as_predicate(&self) -> Option<SharedPredicate<T>> {
        Some(self.clone())
    }
}

/// Caller-owned collection of criteria.
///
/// The extractor only needs the size (for logging) and one forward pass.
pub trait CriteriaSet<C> {
    /// Number of criteria in the collection
    fn size(&self) -> usize;

    /// Iterate over the criteria in the collection's natural order
    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_>;
}

impl<C> CriteriaSet<C> for [C] {
    fn size(&self) -> usize {
        self.len()
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

impl<C, const N: usize> CriteriaSet<C> for [C; N] {
    fn size(&self) -> usize {
        N
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

impl<C> CriteriaSet<C> for Vec<C> {
    fn size(&self) -> usize {
        self.len()
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

impl<C> CriteriaSet<C> for VecDeque<C> {
    fn size(&self) -> usize {
        self.len()
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

impl<C, S> CriteriaSet<C> for HashSet<C, S> {
    fn size(&self) -> usize {
        self.len()
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

impl<C> CriteriaSet<C> for BTreeSet<C> {
    fn size(&self) -> usize {
        self.len()
    }

    fn criteria(&self) -> Box<dyn Iterator<Item = &C> + '_> {
        Box::new(self.iter())
    }
}

/// Capability check deciding whether a criterion is itself a predicate.
///
/// Passing a capability to the extractor enables the direct branch; passing
/// none sends every criterion to the registry.
pub trait DirectPredicate<C, T: ?Sized> {
    fn narrow(&self, criterion: &C) -> Option<SharedPredicate<T>>;
}

/// Capability that delegates to [`Criterion::as_predicate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CriterionCapability;

impl<C, T: ?Sized> DirectPredicate<C, T> for CriterionCapability
where
    C: Criterion<T>,
{
    fn narrow(&self, criterion: &C) -> Option<SharedPredicate<T>> {
        criterion.as_predicate()
    }
}

impl<C, T: ?Sized, F> DirectPredicate<C, T> for F
where
    F: Fn(&C) -> Option<SharedPredicate<T>>,
{
    fn narrow(&self, criterion: &C) -> Option<SharedPredicate<T>> {
        self(criterion)
    }
}

/// External mapping from a criterion to the predicate that evaluates it.
///
/// `Ok(None)` means the registry has no mapping for the criterion, which
/// is not an error. An `Err` is fatal and aborts the whole extraction.
pub trait PredicateRegistry<C, T: ?Sized> {
    fn lookup(&self, criterion: &C) -> Result<Option<SharedPredicate<T>>>;
}

impl<C, T: ?Sized, S> PredicateRegistry<C, T> for HashMap<C, SharedPredicate<T>, S>
where
    C: Hash + Eq,
    S: BuildHasher,
{
    fn lookup(&self, criterion: &C) -> Result<Option<SharedPredicate<T>>> {
        Ok(self.get(criterion).cloned())
    }
}

impl<C, T: ?Sized> PredicateRegistry<C, T> for BTreeMap<C, SharedPredicate<T>>
where
    C: Ord,
{
    fn lookup(&self, criterion: &C) -> Result<Option<SharedPredicate<T>>> {
        Ok(self.get(criterion).cloned())
    }
}
