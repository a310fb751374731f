//! Integration tests for criteria resolution.
//!
//! These tests verify that extraction and filtering work together
//! in a realistic scenario: selecting movies from a catalogue.

use criteria::{
    extract_predicates, filter, CandidateResolver, Criterion, CriterionCapability,
    FilterOptions, PredicateRegistry, PredicateSet, ResolverError, SharedPredicate,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
struct Movie {
    id: u32,
    year: u16,
    genres: Vec<&'static str>,
    avg_rating: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MovieCriterion {
    Genre(&'static str),
    ReleasedAfter(u16),
    Custom(SharedPredicate<Movie>),
}

impl Criterion<Movie> for MovieCriterion {
    fn as_predicate(&self) -> Option<SharedPredicate<Movie>> {
        match self {
            MovieCriterion::Custom(predicate) => Some(predicate.clone()),
            _ => None,
        }
    }
}

/// Registry with one cached predicate per known criterion. Genres it has
/// never heard of are a hard failure, unknown years are simply unmapped.
struct Catalogue {
    known: HashMap<MovieCriterion, SharedPredicate<Movie>>,
    lookups: AtomicUsize,
}

impl Catalogue {
    fn new() -> Self {
        let mut known = HashMap::new();
        for genre in ["Action", "Drama", "Sci-Fi"] {
            known.insert(
                MovieCriterion::Genre(genre),
                SharedPredicate::from_fn(move |m: &Movie| m.genres.contains(&genre)),
            );
        }
        known.insert(
            MovieCriterion::ReleasedAfter(1999),
            SharedPredicate::from_fn(|m: &Movie| m.year > 1999),
        );
        Self {
            known,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl PredicateRegistry<MovieCriterion, Movie> for Catalogue {
    fn lookup(
        &self,
        criterion: &MovieCriterion,
    ) -> criteria::Result<Option<SharedPredicate<Movie>>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match (criterion, self.known.get(criterion)) {
            (_, Some(predicate)) => Ok(Some(predicate.clone())),
            (MovieCriterion::Genre(genre), None) => Err(ResolverError::LookupFailed {
                criterion: format!("genre {}", genre),
                reason: "not in catalogue".to_string(),
            }),
            _ => Ok(None),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

fn movies() -> Vec<Movie> {
    vec![
        Movie { id: 1, year: 1995, genres: vec!["Action", "Adventure"], avg_rating: 4.5 },
        Movie { id: 2, year: 2003, genres: vec!["Drama"], avg_rating: 2.5 },
        Movie { id: 3, year: 2005, genres: vec!["Sci-Fi", "Action"], avg_rating: 4.2 },
        Movie { id: 4, year: 1998, genres: vec!["Comedy"], avg_rating: 3.9 },
    ]
}

fn ids<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<u32> {
    movies.into_iter().map(|m| m.id).collect()
}

#[test]
fn test_recent_action_movies() {
    init_tracing();
    let catalogue = Catalogue::new();
    let criteria = vec![MovieCriterion::Genre("Action"), MovieCriterion::ReleasedAfter(1999)];

    let resolver = CandidateResolver::<MovieCriterion, Movie>::new()
        .with_direct(&CriterionCapability)
        .with_registry(&catalogue);

    let movies = movies();
    let matching = resolver.resolve(Some(&criteria), Some(&movies)).unwrap();

    assert_eq!(ids(matching), vec![3]);
}

#[test]
fn test_any_genre_or_well_rated() {
    init_tracing();
    let catalogue = Catalogue::new();
    let well_rated = SharedPredicate::from_fn(|m: &Movie| m.avg_rating >= 3.8);
    let criteria = vec![MovieCriterion::Genre("Drama"), MovieCriterion::Custom(well_rated)];

    let resolver = CandidateResolver::<MovieCriterion, Movie>::new()
        .with_direct(&CriterionCapability)
        .with_registry(&catalogue)
        .with_options(FilterOptions::new().with_satisfy_any(true));

    let matching: Vec<Movie> = resolver.resolve(Some(&criteria), Some(movies())).unwrap().collect();

    assert_eq!(ids(&matching), vec![1, 2, 3, 4]);
    // Only the Drama criterion needed the registry.
    assert_eq!(catalogue.lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn test_unmapped_criteria_fall_back_to_all_candidates() {
    init_tracing();
    let catalogue = Catalogue::new();
    let criteria = vec![MovieCriterion::ReleasedAfter(2010)];

    let predicates =
        extract_predicates::<MovieCriterion, Movie>(Some(&criteria), None, Some(&catalogue))
            .unwrap();
    assert!(predicates.is_empty());

    let movies = movies();
    let everything = filter(Some(&movies), Some(predicates.clone()), false, false);
    assert_eq!(ids(everything), vec![1, 2, 3, 4]);
    assert!(filter(Some(&movies), Some(predicates), false, true).next().is_none());
}

#[test]
fn test_unknown_genre_aborts_resolution() {
    init_tracing();
    let catalogue = Catalogue::new();
    let criteria = vec![
        MovieCriterion::Genre("Action"),
        MovieCriterion::Genre("Western"),
        MovieCriterion::Genre("Drama"),
    ];

    let result = CandidateResolver::<MovieCriterion, Movie>::new()
        .with_registry(&catalogue)
        .resolve(Some(&criteria), Some(movies()));

    match result {
        Err(ResolverError::LookupFailed { criterion, .. }) => {
            assert_eq!(criterion, "genre Western")
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("resolution should have failed"),
    }
    assert_eq!(catalogue.lookups.load(Ordering::SeqCst), 2);
}

#[test]
fn test_repeated_criteria_share_one_predicate() {
    init_tracing();
    let catalogue = Catalogue::new();
    let criteria = vec![
        MovieCriterion::Genre("Sci-Fi"),
        MovieCriterion::Genre("Sci-Fi"),
        MovieCriterion::ReleasedAfter(1999),
    ];

    let predicates =
        extract_predicates::<MovieCriterion, Movie>(Some(&criteria), None, Some(&catalogue))
            .unwrap();
    assert_eq!(predicates.len(), 2);
}

#[test]
fn test_consumer_stops_early() {
    init_tracing();
    let evaluated = Arc::new(AtomicUsize::new(0));
    let counter = evaluated.clone();
    let drama = SharedPredicate::from_fn(move |m: &Movie| {
        counter.fetch_add(1, Ordering::SeqCst);
        m.genres.contains(&"Drama")
    });
    let predicates: PredicateSet<Movie> = [drama].into_iter().collect();

    let movies = movies();
    let first = filter(Some(&movies), Some(predicates), true, false).next();

    assert_eq!(first.map(|m| m.id), Some(2));
    assert_eq!(evaluated.load(Ordering::SeqCst), 2);
}
