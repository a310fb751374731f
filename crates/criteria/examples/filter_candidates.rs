//! Example: Select candidates matching a set of criteria
//!
//! Run with: RUST_LOG=criteria=trace cargo run --package criteria --example filter_candidates
//!
//! This example shows how to:
//! 1. Describe criteria, some of which are predicates themselves
//! 2. Back the remaining criteria with a registry
//! 3. Resolve candidates with AND and OR semantics
//! 4. Stop consuming early without evaluating the rest

use criteria::{CandidateResolver, Criterion, CriterionCapability, FilterOptions, SharedPredicate};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NumberCriterion {
    Even,
    Negative,
    DivisibleBy(i64, SharedPredicate<i64>),
}

impl NumberCriterion {
    fn divisible_by(divisor: i64) -> Self {
        let predicate = SharedPredicate::from_fn(move |n: &i64| n % divisor == 0);
        NumberCriterion::DivisibleBy(divisor, predicate)
    }
}

impl Criterion<i64> for NumberCriterion {
    fn as_predicate(&self) -> Option<SharedPredicate<i64>> {
        match self {
            NumberCriterion::DivisibleBy(_, predicate) => Some(predicate.clone()),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut registry = HashMap::new();
    registry.insert(NumberCriterion::Even, SharedPredicate::from_fn(|n: &i64| n % 2 == 0));
    registry.insert(NumberCriterion::Negative, SharedPredicate::from_fn(|n: &i64| *n < 0));

    let candidates: Vec<i64> = vec![1, 2, -3, 4, 5, -6, 9, -12];
    let criteria = vec![
        NumberCriterion::Even,
        NumberCriterion::Negative,
        NumberCriterion::divisible_by(3),
    ];

    let all = CandidateResolver::<NumberCriterion, i64>::new()
        .with_direct(&CriterionCapability)
        .with_registry(&registry);
    let any = all.with_options(FilterOptions::new().with_satisfy_any(true));

    println!("=== Criteria Resolution Example ===\n");
    println!("Candidates: {:?}", candidates);
    println!("Criteria:   {:?}\n", criteria);

    let matching: Vec<&i64> = all.resolve(Some(&criteria), Some(&candidates))?.collect();
    println!("All criteria hold:  {:?}", matching);

    let matching: Vec<&i64> = any.resolve(Some(&criteria), Some(&candidates))?.collect();
    println!("Any criterion holds: {:?}", matching);

    let first = any.resolve(Some(&criteria), Some(&candidates))?.next();
    println!("First match only:    {:?}", first);

    Ok(())
}
