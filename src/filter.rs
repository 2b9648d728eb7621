//! Distance attachment, predicate filtering, and nearest-first ranking.

use rayon::prelude::*;

use crate::geo;
use crate::model::{Coordinate, RestroomRecord, SearchFilters};

/// Applies `filters` to `candidates` relative to `origin`.
///
/// Each surviving record is a copy with `distance` set; the shared input is
/// never mutated. Results are sorted ascending by distance with a stable
/// sort, so equal distances keep their input order. Pure: no I/O, safe to
/// call concurrently on independent inputs.
pub fn apply(
    candidates: &[RestroomRecord],
    origin: Coordinate,
    filters: &SearchFilters,
) -> Vec<RestroomRecord> {
    let tagged: Vec<RestroomRecord> = candidates
        .par_iter()
        .map(|c| c.with_distance(geo::haversine_meters(origin, c.location)))
        .collect();

    let mut results: Vec<RestroomRecord> =
        tagged.into_iter().filter(|c| passes(c, filters)).collect();

    results.sort_by(|a, b| {
        a.distance
            .unwrap_or(0.0)
            .total_cmp(&b.distance.unwrap_or(0.0))
    });
    results
}

fn passes(candidate: &RestroomRecord, filters: &SearchFilters) -> bool {
    let distance = candidate.distance.unwrap_or(0.0);
    if distance > filters.max_distance {
        return false;
    }
    if filters.is_free && !candidate.is_free {
        return false;
    }
    if filters.is_accessible && !candidate.is_accessible {
        return false;
    }
    if filters.has_changing_table && !candidate.has_changing_table {
        return false;
    }
    if filters.is_open && !candidate.is_open {
        return false;
    }
    // A record without a rating passes even when min_rating > 0. Existing
    // behavior, kept pending a product decision.
    if let Some(rating) = candidate.rating {
        if rating < filters.min_rating {
            return false;
        }
    }
    true
}
