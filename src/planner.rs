//! Multi-stop route planning.
//!
//! A plan resolves two free-text endpoints into coordinates, selects stops
//! that pass the search filters, and assembles an immutable [`Route`]. The
//! steps are strictly sequential; the first failure aborts the whole plan.

use tracing::debug;

use crate::error::PlanError;
use crate::filter;
use crate::geo;
use crate::model::{Coordinate, Route, RoutePoint, RoutePointKind, SearchFilters};
use crate::store::CandidateStore;
use crate::traits::{Geocoder, LocationProvider, PersistenceStore};

/// Start-input sentinel meaning "use the device fix".
pub const CURRENT_LOCATION: &str = "Current Location";

/// Plans start → stops → end routes from free-text endpoints.
#[derive(Debug, Clone)]
pub struct RoutePlanner<G, S> {
    geocoder: G,
    candidates: CandidateStore<S>,
    speed_mph: f64,
}

impl<G: Geocoder, S: PersistenceStore> RoutePlanner<G, S> {
    pub fn new(geocoder: G, candidates: CandidateStore<S>) -> Self {
        Self {
            geocoder,
            candidates,
            speed_mph: geo::DEFAULT_SPEED_MPH,
        }
    }

    /// Overrides the assumed travel speed used for the ETA.
    pub fn with_speed_mph(mut self, speed_mph: f64) -> Self {
        self.speed_mph = speed_mph;
        self
    }

    /// Plans a route from `start_text` to `end_text`, selecting stops that
    /// pass `filters` around the resolved start.
    ///
    /// `origin` is the device fix; it is required when the start input is
    /// empty or the [`CURRENT_LOCATION`] sentinel. An empty destination is
    /// rejected before any geocoding happens. No partial route is ever
    /// returned: the first unresolvable step fails the whole call.
    pub fn plan_route(
        &self,
        start_text: &str,
        end_text: &str,
        origin: Option<Coordinate>,
        filters: &SearchFilters,
    ) -> Result<Route, PlanError> {
        let end_text = end_text.trim();
        if end_text.is_empty() {
            return Err(PlanError::MissingDestination);
        }

        let start_text = start_text.trim();
        let use_device_fix =
            start_text.is_empty() || start_text.eq_ignore_ascii_case(CURRENT_LOCATION);
        let (start_coord, start_name) = if use_device_fix {
            let coord = origin.ok_or(PlanError::LocationUnavailable)?;
            // Label the start with its street address when reverse geocoding
            // has one; otherwise fall back to the sentinel text.
            let name = self
                .geocoder
                .reverse(coord)
                .filter(|addr| !addr.is_empty())
                .unwrap_or_else(|| CURRENT_LOCATION.to_string());
            (coord, name)
        } else {
            let coord = self
                .geocoder
                .forward(start_text)
                .ok_or_else(|| PlanError::GeocodeFailed(start_text.to_string()))?;
            (coord, start_text.to_string())
        };

        let end_coord = self
            .geocoder
            .forward(end_text)
            .ok_or_else(|| PlanError::GeocodeFailed(end_text.to_string()))?;

        let total_distance_m = geo::haversine_meters(start_coord, end_coord);
        let estimated_minutes =
            geo::estimate_travel_minutes(geo::meters_to_miles(total_distance_m), self.speed_mph);

        let raw = self.candidates.query_near(start_coord, filters.max_distance)?;
        let stops = filter::apply(&raw, start_coord, filters);
        debug!(
            stops = stops.len(),
            total_distance_m, estimated_minutes, "route planned"
        );

        let created_at_ms = Route::now_ms();
        Ok(Route {
            id: Route::next_id(created_at_ms),
            start: RoutePoint {
                location: start_coord,
                name: start_name,
                kind: RoutePointKind::Start,
            },
            end: RoutePoint {
                location: end_coord,
                name: end_text.to_string(),
                kind: RoutePointKind::End,
            },
            stops,
            total_distance_m,
            estimated_minutes,
            created_at_ms,
        })
    }

    /// [`RoutePlanner::plan_route`] with the start taken from a device
    /// location provider: acquires the provider, reads one fix, and
    /// releases it again whatever the outcome.
    pub fn plan_route_from_device<L: LocationProvider>(
        &self,
        provider: &mut L,
        end_text: &str,
        filters: &SearchFilters,
    ) -> Result<Route, PlanError> {
        provider.acquire()?;
        let fix = provider.current_coordinate();
        provider.release();
        let origin = fix?;
        self.plan_route(CURRENT_LOCATION, end_text, Some(origin), filters)
    }
}

/// Generation counter for in-flight plans.
///
/// Concurrent submissions are not guaranteed to resolve in order. Callers
/// tag each call with [`PlanGeneration::begin`] and drop any result whose
/// tag [`PlanGeneration::is_current`] rejects, so a superseded plan can
/// never overwrite a newer one.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanGeneration {
    latest: u64,
}

impl PlanGeneration {
    /// Marks a new in-flight plan and returns its tag.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.latest
    }
}
