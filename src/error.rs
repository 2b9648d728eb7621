//! Error types shared across the planning core.

use thiserror::Error;

/// Failure of a device-location read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("device position unavailable")]
    PositionUnavailable,
}

/// The backing record store could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("candidate store unreachable: {0}")]
pub struct StoreError(pub String);

/// Route planning failure.
///
/// Planning aborts on the first failed step; a partial route is never
/// surfaced. Presentation is expected to offer a retry on `GeocodeFailed`
/// and `DataUnavailable`, and a permission prompt on `LocationUnavailable`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("no device location fix and none supplied")]
    LocationUnavailable,
    #[error("could not geocode {0:?}")]
    GeocodeFailed(String),
    #[error("no destination given")]
    MissingDestination,
    #[error("candidate data unavailable: {0}")]
    DataUnavailable(#[from] StoreError),
}

impl From<LocationError> for PlanError {
    fn from(_: LocationError) -> Self {
        PlanError::LocationUnavailable
    }
}
