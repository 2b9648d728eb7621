//! Filter engine tests: predicate semantics, ranking, and the documented
//! missing-rating quirk.

mod fixtures;

use fixtures::{new_york_records, RecordBuilder, TIMES_SQUARE};
use restroom_router::filter;
use restroom_router::model::SearchFilters;

#[test]
fn nearest_selection_from_times_square() {
    let candidates = new_york_records();
    let filters = SearchFilters::default(); // 5 km, all attributes don't-care

    let results = filter::apply(&candidates, TIMES_SQUARE, &filters);

    assert_eq!(results.len(), 5, "all five records are within 5 km");
    assert_eq!(results[0].name, "Times Square McDonald's");
    let first = results[0].distance.expect("distance attached");
    assert!(first < 1.0, "query origin sits on the record, got {first}");
}

#[test]
fn results_are_sorted_by_ascending_distance() {
    let results = filter::apply(&new_york_records(), TIMES_SQUARE, &SearchFilters::default());

    let distances: Vec<f64> = results
        .iter()
        .map(|r| r.distance.expect("distance attached"))
        .collect();
    assert!(
        distances.windows(2).all(|w| w[0] <= w[1]),
        "non-decreasing: {distances:?}"
    );
}

#[test]
fn input_candidates_are_never_mutated() {
    let candidates = new_york_records();
    let _ = filter::apply(&candidates, TIMES_SQUARE, &SearchFilters::default());
    assert!(candidates.iter().all(|c| c.distance.is_none()));
}

#[test]
fn attribute_flags_mean_must_have() {
    let candidates = new_york_records();
    let filters = SearchFilters {
        is_free: true,
        ..SearchFilters::default()
    };

    let results = filter::apply(&candidates, TIMES_SQUARE, &filters);
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.is_free));
}

#[test]
fn max_distance_bounds_results() {
    let candidates = new_york_records();
    let filters = SearchFilters {
        max_distance: 1_000.0,
        ..SearchFilters::default()
    };

    let results = filter::apply(&candidates, TIMES_SQUARE, &filters);
    // McDonald's (~0 m), Bryant Park (~0.5 km), Grand Central (~0.9 km).
    assert_eq!(results.len(), 3);
    assert!(results.iter().all(|r| r.distance.unwrap() <= 1_000.0));
}

#[test]
fn stricter_filters_select_a_subset() {
    let candidates = new_york_records();
    let loose = SearchFilters::default();
    let strict = SearchFilters {
        max_distance: 1_000.0,
        has_changing_table: true,
        min_rating: 4.0,
        ..SearchFilters::default()
    };

    let loose_ids: Vec<String> = filter::apply(&candidates, TIMES_SQUARE, &loose)
        .into_iter()
        .map(|r| r.id)
        .collect();
    let strict_results = filter::apply(&candidates, TIMES_SQUARE, &strict);

    assert!(strict_results.len() < loose_ids.len());
    for r in &strict_results {
        assert!(loose_ids.contains(&r.id));
    }
}

#[test]
fn min_rating_rejects_only_rated_records_below_it() {
    let origin = restroom_router::model::Coordinate::new(0.0, 0.0);
    let rated_low = RecordBuilder::new("low", "Rated Low").at(0.0, 0.0).rating(1.0).build();
    let unrated = RecordBuilder::new("none", "Unrated").at(0.0, 0.001).build();
    let rated_high = RecordBuilder::new("high", "Rated High").at(0.0, 0.002).rating(4.5).build();

    let filters = SearchFilters {
        min_rating: 3.0,
        ..SearchFilters::permissive()
    };
    let results = filter::apply(&[rated_low, unrated, rated_high], origin, &filters);

    let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
    // The unrated record passes even though min_rating > 0; kept behavior.
    assert_eq!(ids, vec!["none", "high"]);
}

#[test]
fn equal_distances_keep_input_order() {
    let a = RecordBuilder::new("a", "First").at(10.0, 10.0).build();
    let b = RecordBuilder::new("b", "Second").at(10.0, 10.0).build();
    let origin = restroom_router::model::Coordinate::new(10.0, 10.01);

    let results = filter::apply(&[a, b], origin, &SearchFilters::permissive());
    assert_eq!(results[0].id, "a");
    assert_eq!(results[1].id, "b");
}
