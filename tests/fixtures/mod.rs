//! Test fixtures for restroom-router.
//!
//! Provides the New York demo dataset the original app ships with, plus a
//! builder for one-off records.

pub mod new_york_locations;

pub use new_york_locations::*;
