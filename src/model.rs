//! Domain model for restroom search and route planning.
//!
//! Records are read-only from the core's perspective: search operations that
//! need to attach a query-relative distance do so on a copy, never on the
//! shared record.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
///
/// Latitude is expected in [-90, 90] and longitude in [-180, 180]; bounds
/// validation is the caller's concern so the distance hot path stays
/// allocation- and branch-free. Out-of-range values produce odd distances,
/// not errors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A public restroom as stored by the backing collection.
///
/// `id` is assigned by the store on creation and opaque to the core.
/// `distance` is transient: a search attaches it (meters from the query
/// origin) to a copy of the record, and it is never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestroomRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinate,
    pub is_open: bool,
    pub is_free: bool,
    pub is_accessible: bool,
    pub has_changing_table: bool,
    /// Upvotes minus downvotes from some sources, so it may be negative.
    pub rating: Option<f64>,
    pub hours: Option<String>,
    pub distance: Option<f64>,
}

impl RestroomRecord {
    /// Copy of this record with `distance` (meters from a query origin) set.
    pub fn with_distance(&self, meters: f64) -> Self {
        let mut copy = self.clone();
        copy.distance = Some(meters);
        copy
    }
}

/// Search predicate set.
///
/// A `true` attribute flag means "must have"; `false` means "don't care".
/// The flags are not invertible to "must not have".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Inclusive upper bound on distance from the query origin, in meters.
    pub max_distance: f64,
    pub is_free: bool,
    pub is_accessible: bool,
    pub has_changing_table: bool,
    pub is_open: bool,
    /// Inclusive lower bound on rating. A record without a rating passes
    /// this clause regardless of `min_rating`; see `filter::apply`.
    pub min_rating: f64,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            max_distance: 5_000.0,
            is_free: false,
            is_accessible: false,
            has_changing_table: false,
            is_open: false,
            min_rating: 0.0,
        }
    }
}

impl SearchFilters {
    /// Filters wide enough to return every record within 1000 km, used when
    /// loading the typeahead candidate pool.
    pub fn permissive() -> Self {
        Self {
            max_distance: 1_000_000.0,
            ..Self::default()
        }
    }
}

/// Role of a point within a planned route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePointKind {
    Start,
    End,
    Bathroom,
    Waypoint,
}

/// A named waypoint of a planned route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub location: Coordinate,
    pub name: String,
    pub kind: RoutePointKind,
}

/// A planned start → stops → end route. Immutable once built; re-planning
/// produces a new `Route` that supersedes the old one.
///
/// `total_distance_m` is the straight-line start→end distance, not the sum
/// of stop-to-stop legs, and `stops` keep the filter engine's nearest-first
/// order (no tour optimization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    pub start: RoutePoint,
    pub end: RoutePoint,
    pub stops: Vec<RestroomRecord>,
    pub total_distance_m: f64,
    pub estimated_minutes: i64,
    pub created_at_ms: u64,
}

static ROUTE_SEQ: AtomicU64 = AtomicU64::new(0);

impl Route {
    /// Session-local route id: creation timestamp plus a process-wide
    /// sequence number. Monotonic enough for superseding held references;
    /// not a global identifier.
    pub(crate) fn next_id(created_at_ms: u64) -> String {
        let seq = ROUTE_SEQ.fetch_add(1, Ordering::Relaxed);
        format!("route-{created_at_ms}-{seq}")
    }

    pub(crate) fn now_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// One turn-by-turn step from an external directions provider.
///
/// The instruction may carry HTML markup; navigation strips it to plain
/// text before narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionStep {
    pub instruction: String,
    pub distance_label: String,
    pub duration_label: String,
}

/// A directions response: the step list plus decoded route geometry.
/// Geometry is presentation-only; navigation walks the steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRoute {
    pub steps: Vec<DirectionStep>,
    pub geometry: Polyline,
}

/// Route geometry as decoded (latitude, longitude) points.
///
/// The compact encoded-polyline format is handled at the provider boundary
/// (see `directions::decode_polyline`); internally geometry is always a
/// plain point sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Each point is a (latitude, longitude) tuple.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }
}

/// An autocomplete suggestion from an external place provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub description: String,
    pub main_text: String,
    pub secondary_text: String,
    pub place_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_distance_copies_instead_of_mutating() {
        let record = RestroomRecord {
            id: "r1".to_string(),
            name: "Bryant Park Restroom".to_string(),
            address: "42nd St & 5th Ave, New York, NY".to_string(),
            location: Coordinate::new(40.7536, -73.9832),
            is_open: true,
            is_free: true,
            is_accessible: true,
            has_changing_table: false,
            rating: Some(4.0),
            hours: None,
            distance: None,
        };

        let tagged = record.with_distance(123.0);
        assert_eq!(tagged.distance, Some(123.0));
        assert_eq!(record.distance, None);
        assert_eq!(tagged.id, record.id);
    }

    #[test]
    fn route_ids_are_unique_within_a_session() {
        let a = Route::next_id(1_000);
        let b = Route::next_id(1_000);
        assert_ne!(a, b);
    }

    #[test]
    fn permissive_filters_disable_attribute_predicates() {
        let filters = SearchFilters::permissive();
        assert!(!filters.is_free);
        assert!(!filters.is_open);
        assert_eq!(filters.min_rating, 0.0);
        assert_eq!(filters.max_distance, 1_000_000.0);
    }
}
