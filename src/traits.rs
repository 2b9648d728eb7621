//! Collaborator seams for the planning core.
//!
//! Everything with I/O behind it (device location, geocoding, place
//! autocomplete, directions, the record store, text-to-speech) is a trait
//! here, so the planner and navigation logic run unchanged against HTTP
//! adapters in production and in-memory fakes in tests.

use crate::error::{LocationError, StoreError};
use crate::model::{Coordinate, DirectionsRoute, PlaceSuggestion, RestroomRecord};

/// Device location source with an explicit lifecycle: callers `acquire`
/// before reading and `release` when done, instead of holding ambient
/// global state.
pub trait LocationProvider {
    fn acquire(&mut self) -> Result<(), LocationError> {
        Ok(())
    }

    fn current_coordinate(&self) -> Result<Coordinate, LocationError>;

    fn release(&mut self) {}
}

/// Forward and reverse geocoding.
///
/// `None` means no result; adapters treat transport failures the same way,
/// and the planner reports both as a geocode failure for the query text.
pub trait Geocoder {
    fn forward(&self, address: &str) -> Option<Coordinate>;

    fn reverse(&self, coordinate: Coordinate) -> Option<String>;
}

/// Free-text place autocomplete.
pub trait PlaceSuggester {
    fn suggest(&self, input: &str) -> Vec<PlaceSuggestion>;

    fn details(&self, place_id: &str) -> Option<Coordinate>;
}

/// Turn-by-turn directions through an ordered waypoint list.
pub trait DirectionsProvider {
    fn route(&self, waypoints: &[Coordinate]) -> Option<DirectionsRoute>;
}

/// Backing record collection. Read-only from the core's perspective;
/// record creation and editing belong to external ingestion/admin flows.
pub trait PersistenceStore {
    fn query_bounding_box(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<RestroomRecord>, StoreError>;

    fn query_all(&self) -> Result<Vec<RestroomRecord>, StoreError>;
}

/// Text-to-speech consumer of navigation instructions. Fire-and-forget,
/// no acknowledgement.
pub trait NarrationSink {
    fn speak(&mut self, text: &str);
}
