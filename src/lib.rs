//! restroom-router core
//!
//! Search, filtering, and multi-stop route planning for finding public
//! restrooms near a location or on the way to a destination. External
//! services (device location, geocoding, directions, persistence, speech)
//! sit behind the traits in [`traits`]; everything else is synchronous
//! computation that can be exercised against in-memory fakes.

pub mod directions;
pub mod error;
pub mod filter;
pub mod geo;
pub mod geocode;
pub mod model;
pub mod navigation;
pub mod planner;
pub mod store;
pub mod traits;
pub mod typeahead;
