//! Lazy filtering of candidate sequences through a combined predicate.
//!
//! Nothing is evaluated until the returned [`Filtered`] iterator is pulled,
//! and each pull evaluates only as many candidates as it takes to find the
//! next match. Dropping the iterator early is the only cancellation there is.

use crate::config::FilterOptions;
use crate::predicate::{PredicateSet, SharedPredicate};
use crate::traits::Predicate;
use std::borrow::Borrow;
use std::fmt;
use std::iter::FusedIterator;

/// Logical connective used to fold a predicate set into one predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Logical OR: at least one predicate must hold
    AnyOf,
    /// Logical AND: every predicate must hold
    AllOf,
}

impl Combinator {
    pub fn from_satisfy_any(satisfy_any: bool) -> Self {
        if satisfy_any {
            Combinator::AnyOf
        } else {
            Combinator::AllOf
        }
    }
}

/// One or more predicates folded with a [`Combinator`].
///
/// Evaluation short-circuits in the set's insertion order.
pub struct CombinedPredicate<T: ?Sized> {
    combinator: Combinator,
    predicates: Vec<SharedPredicate<T>>,
}

impl<T: ?Sized> CombinedPredicate<T> {
    /// Combine `predicates`, or return `None` if the set is empty.
    pub fn combine(predicates: PredicateSet<T>, combinator: Combinator) -> Option<Self> {
        if predicates.is_empty() {
            return None;
        }
        Some(Self {
            combinator,
            predicates: predicates.into_vec(),
        })
    }

    pub fn combinator(&self) -> Combinator {
        self.combinator
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }
}

impl<T: ?Sized> Predicate<T> for CombinedPredicate<T> {
    fn evaluate(&self, candidate: &T) -> bool {
        match self.combinator {
            Combinator::AnyOf => self.predicates.iter().any(|p| p.evaluate(candidate)),
            Combinator::AllOf => self.predicates.iter().all(|p| p.evaluate(candidate)),
        }
    }
}

impl<T: ?Sized> Clone for CombinedPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            combinator: self.combinator,
            predicates: self.predicates.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for CombinedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedPredicate")
            .field("combinator", &self.combinator)
            .field("predicates", &self.predicates)
            .finish()
    }
}

enum FilterState<I, T: ?Sized> {
    Empty,
    Unfiltered(I),
    Matching {
        candidates: I,
        combined: CombinedPredicate<T>,
    },
}

/// Lazy iterator returned by [`filter`].
///
/// Cloning it (when the underlying iterator is `Clone`) gives an
/// independent traversal from the current position.
pub struct Filtered<I, T: ?Sized> {
    state: FilterState<I, T>,
}

impl<I, T: ?Sized> Filtered<I, T> {
    fn empty() -> Self {
        Self {
            state: FilterState::Empty,
        }
    }

    fn unfiltered(candidates: I) -> Self {
        Self {
            state: FilterState::Unfiltered(candidates),
        }
    }

    fn matching(candidates: I, combined: CombinedPredicate<T>) -> Self {
        Self {
            state: FilterState::Matching {
                candidates,
                combined,
            },
        }
    }

    /// The combined predicate, if candidates are actually being tested.
    pub fn predicate(&self) -> Option<&CombinedPredicate<T>> {
        match &self.state {
            FilterState::Matching { combined, .. } => Some(combined),
            _ => None,
        }
    }
}

impl<I, T> Iterator for Filtered<I, T>
where
    I: Iterator,
    I::Item: Borrow<T>,
    T: ?Sized,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        match &mut self.state {
            FilterState::Empty => None,
            FilterState::Unfiltered(candidates) => candidates.next(),
            FilterState::Matching {
                candidates,
                combined,
            } => candidates.find(|candidate| combined.evaluate(Borrow::<T>::borrow(candidate))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            FilterState::Empty => (0, Some(0)),
            FilterState::Unfiltered(candidates) => candidates.size_hint(),
            FilterState::Matching { candidates, .. } => (0, candidates.size_hint().1),
        }
    }
}

impl<I, T> FusedIterator for Filtered<I, T>
where
    I: FusedIterator,
    I::Item: Borrow<T>,
    T: ?Sized,
{
}

impl<I: Clone, T: ?Sized> Clone for Filtered<I, T> {
    fn clone(&self) -> Self {
        let state = match &self.state {
            FilterState::Empty => FilterState::Empty,
            FilterState::Unfiltered(candidates) => FilterState::Unfiltered(candidates.clone()),
            FilterState::Matching {
                candidates,
                combined,
            } => FilterState::Matching {
                candidates: candidates.clone(),
                combined: combined.clone(),
            },
        };
        Self { state }
    }
}

/// Filter `candidates` through `predicates`.
///
/// Checks are applied in this order:
/// 1. Absent candidates yield an empty sequence.
/// 2. Absent or empty predicates yield an empty sequence when
///    `empty_predicates_yield_empty` is set, otherwise the candidates
///    themselves, untouched.
/// 3. Otherwise candidates are kept, in order, when the OR
///    (`satisfy_any`) or AND of the predicates holds.
pub fn filter<I, T>(
    candidates: Option<I>,
    predicates: Option<PredicateSet<T>>,
    satisfy_any: bool,
    empty_predicates_yield_empty: bool,
) -> Filtered<I::IntoIter, T>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    T: ?Sized,
{
    let Some(candidates) = candidates else {
        return Filtered::empty();
    };

    let combined = predicates
        .and_then(|set| CombinedPredicate::combine(set, Combinator::from_satisfy_any(satisfy_any)));

    match combined {
        Some(combined) => Filtered::matching(candidates.into_iter(), combined),
        None if empty_predicates_yield_empty => Filtered::empty(),
        None => Filtered::unfiltered(candidates.into_iter()),
    }
}

/// [`filter`] with the flags taken from `options`.
pub fn filter_with<I, T>(
    candidates: Option<I>,
    predicates: Option<PredicateSet<T>>,
    options: &FilterOptions,
) -> Filtered<I::IntoIter, T>
where
    I: IntoIterator,
    I::Item: Borrow<T>,
    T: ?Sized,
{
    filter(
        candidates,
        predicates,
        options.satisfy_any,
        options.empty_predicates_yield_empty,
    )
}
