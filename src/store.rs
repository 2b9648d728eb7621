//! Candidate lookup over a backing record store.
//!
//! `query_near` builds a coarse bounding box around the origin. The box
//! over-selects near the poles and at its corners; that is fine, because
//! true radius filtering happens downstream in the filter engine.

use tracing::debug;

use crate::error::StoreError;
use crate::model::{Coordinate, RestroomRecord};
use crate::traits::PersistenceStore;

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// Half-widths of a bounding box covering `radius_m` around `origin`, as
/// (latitude delta, longitude delta) in degrees. The longitude delta widens
/// with latitude as meridians converge.
pub fn bounding_box_deltas(origin: Coordinate, radius_m: f64) -> (f64, f64) {
    let radius_km = radius_m / 1_000.0;
    let lat_delta = radius_km / KM_PER_DEGREE;
    let lon_delta = radius_km / (KM_PER_DEGREE * origin.latitude.to_radians().cos());
    (lat_delta, lon_delta)
}

/// Read-side access to restroom candidates, generic over the persistence
/// backend.
#[derive(Debug, Clone)]
pub struct CandidateStore<S> {
    store: S,
}

impl<S: PersistenceStore> CandidateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records inside a coarse bounding box covering `radius_m` of `origin`.
    ///
    /// Store unavailability propagates; it is never swallowed here.
    pub fn query_near(
        &self,
        origin: Coordinate,
        radius_m: f64,
    ) -> Result<Vec<RestroomRecord>, StoreError> {
        let (lat_delta, lon_delta) = bounding_box_deltas(origin, radius_m);
        let records = self.store.query_bounding_box(
            origin.latitude - lat_delta,
            origin.latitude + lat_delta,
            origin.longitude - lon_delta,
            origin.longitude + lon_delta,
        )?;
        debug!(count = records.len(), radius_m, "bounding-box query");
        Ok(records)
    }

    /// Unbounded scan, used when no radius constraint applies (typeahead
    /// candidate loading).
    pub fn query_all(&self) -> Result<Vec<RestroomRecord>, StoreError> {
        self.store.query_all()
    }
}

/// In-memory `PersistenceStore` for tests and offline/demo datasets.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<RestroomRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<RestroomRecord>) -> Self {
        Self { records }
    }
}

impl PersistenceStore for MemoryStore {
    fn query_bounding_box(
        &self,
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    ) -> Result<Vec<RestroomRecord>, StoreError> {
        Ok(self
            .records
            .iter()
            .filter(|r| {
                r.location.latitude >= min_lat
                    && r.location.latitude <= max_lat
                    && r.location.longitude >= min_lon
                    && r.location.longitude <= max_lon
            })
            .cloned()
            .collect())
    }

    fn query_all(&self) -> Result<Vec<RestroomRecord>, StoreError> {
        Ok(self.records.clone())
    }
}
