//! Shared predicate handles and the identity-deduplicated predicate set.

use crate::traits::Predicate;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Reference-counted, thread-safe handle to a predicate over `T`.
///
/// Equality, ordering and hashing go by allocation identity: clones of one
/// handle compare equal, while two handles built from identical closures do
/// not. This is what the extractor deduplicates on.
pub struct SharedPredicate<T: ?Sized>(Arc<dyn Predicate<T> + Send + Sync>);

impl<T: ?Sized> SharedPredicate<T> {
    /// Wrap any predicate in a new shared handle.
    pub fn new<P>(predicate: P) -> Self
    where
        P: Predicate<T> + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Wrap a closure. Same as [`SharedPredicate::new`] but pins down the
    /// closure signature so argument types can be inferred.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(f)
    }

    /// Adopt an existing trait object without reallocating, keeping its identity.
    pub fn from_arc(predicate: Arc<dyn Predicate<T> + Send + Sync>) -> Self {
        Self(predicate)
    }

    /// Returns true if both handles point at the same predicate.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }

    // Thin address; the vtable half of the fat pointer is not part of identity.
    fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl<T: ?Sized> Predicate<T> for SharedPredicate<T> {
    fn evaluate(&self, candidate: &T) -> bool {
        self.0.evaluate(candidate)
    }
}

impl<T: ?Sized> Clone for SharedPredicate<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: ?Sized> PartialEq for SharedPredicate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> Eq for SharedPredicate<T> {}

impl<T: ?Sized> Hash for SharedPredicate<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl<T: ?Sized> PartialOrd for SharedPredicate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for SharedPredicate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.addr().cmp(&other.addr())
    }
}

impl<T: ?Sized> fmt::Debug for SharedPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedPredicate({:#x})", self.addr())
    }
}

/// Insertion-ordered set of predicates, deduplicated by handle identity.
///
/// Iteration order is the order in which predicates were first inserted,
/// which keeps short-circuit evaluation in the filter deterministic.
pub struct PredicateSet<T: ?Sized> {
    entries: Vec<SharedPredicate<T>>,
    seen: HashSet<SharedPredicate<T>>,
}

impl<T: ?Sized> PredicateSet<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Add a predicate. Returns false (and changes nothing) if the same
    /// handle is already present.
    pub fn insert(&mut self, predicate: SharedPredicate<T>) -> bool {
        if !self.seen.insert(predicate.clone()) {
            return false;
        }
        self.entries.push(predicate);
        true
    }

    pub fn contains(&self, predicate: &SharedPredicate<T>) -> bool {
        self.seen.contains(predicate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SharedPredicate<T>> {
        self.entries.iter()
    }

    /// Consume the set, yielding the predicates in insertion order.
    pub fn into_vec(self) -> Vec<SharedPredicate<T>> {
        self.entries
    }
}

impl<T: ?Sized> Default for PredicateSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for PredicateSet<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            seen: self.seen.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for PredicateSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.iter()).finish()
    }
}

impl<T: ?Sized> Extend<SharedPredicate<T>> for PredicateSet<T> {
    fn extend<I: IntoIterator<Item = SharedPredicate<T>>>(&mut self, iter: I) {
        for predicate in iter {
            self.insert(predicate);
        }
    }
}

impl<T: ?Sized> FromIterator<SharedPredicate<T>> for PredicateSet<T> {
    fn from_iter<I: IntoIterator<Item = SharedPredicate<T>>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: ?Sized> IntoIterator for PredicateSet<T> {
    type Item = SharedPredicate<T>;
    type IntoIter = std::vec::IntoIter<SharedPredicate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T: ?Sized> IntoIterator for &'a PredicateSet<T> {
    type Item = &'a SharedPredicate<T>;
    type IntoIter = std::slice::Iter<'a, SharedPredicate<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
