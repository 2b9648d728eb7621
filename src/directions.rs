//! Turn-by-turn directions HTTP adapter (Google Directions API shape).
//!
//! Returns per-step instructions with distance/duration labels plus the
//! decoded overview geometry. The encoded-polyline format never leaves this
//! boundary; everything downstream works with plain point sequences.

use serde::Deserialize;
use tracing::warn;

use crate::model::{Coordinate, DirectionStep, DirectionsRoute, Polyline};
use crate::traits::DirectionsProvider;

#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    pub base_url: String,
    pub api_key: String,
    /// Travel mode: "walking", "driving", "bicycling", or "transit".
    pub mode: String,
    pub timeout_secs: u64,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            mode: "walking".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleDirections {
    config: DirectionsConfig,
    client: reqwest::blocking::Client,
}

impl GoogleDirections {
    pub fn new(config: DirectionsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }
}

impl DirectionsProvider for GoogleDirections {
    fn route(&self, waypoints: &[Coordinate]) -> Option<DirectionsRoute> {
        if waypoints.len() < 2 {
            return None;
        }

        let fmt = |c: &Coordinate| format!("{:.6},{:.6}", c.latitude, c.longitude);
        let origin = fmt(&waypoints[0]);
        let destination = fmt(&waypoints[waypoints.len() - 1]);
        let via = waypoints[1..waypoints.len() - 1]
            .iter()
            .map(fmt)
            .collect::<Vec<_>>()
            .join("|");

        let url = format!("{}/maps/api/directions/json", self.config.base_url);
        let mut request = self.client.get(url).query(&[
            ("origin", origin.as_str()),
            ("destination", destination.as_str()),
            ("mode", self.config.mode.as_str()),
            ("key", self.config.api_key.as_str()),
        ]);
        if !via.is_empty() {
            request = request.query(&[("waypoints", via.as_str())]);
        }

        let response = request
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DirectionsResponse>());

        let body = match response {
            Ok(body) if body.status == "OK" => body,
            Ok(body) => {
                warn!(status = %body.status, "directions returned no route");
                return None;
            }
            Err(err) => {
                warn!(%err, "directions request failed");
                return None;
            }
        };

        let route = body.routes.into_iter().next()?;
        let steps = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| DirectionStep {
                instruction: step.html_instructions.unwrap_or_default(),
                distance_label: step.distance.map(|d| d.text).unwrap_or_default(),
                duration_label: step.duration.map(|d| d.text).unwrap_or_default(),
            })
            .collect();
        let geometry = decode_polyline(&route.overview_polyline.points);

        Some(DirectionsRoute { steps, geometry })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    legs: Vec<Leg>,
    overview_polyline: OverviewPolyline,
}

#[derive(Debug, Deserialize)]
struct Leg {
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
struct Step {
    html_instructions: Option<String>,
    distance: Option<Label>,
    duration: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    text: String,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    #[serde(default)]
    points: String,
}

/// Decodes an encoded polyline string into (latitude, longitude) points.
///
/// Tolerates truncated input by stopping at the end of the string.
pub fn decode_polyline(encoded: &str) -> Polyline {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut pos = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while pos < bytes.len() {
        lat += decode_signed(bytes, &mut pos);
        lng += decode_signed(bytes, &mut pos);
        points.push((lat as f64 / 1e5, lng as f64 / 1e5));
    }
    Polyline::new(points)
}

fn decode_signed(bytes: &[u8], pos: &mut usize) -> i64 {
    let mut value: i64 = 0;
    let mut shift = 0;
    while *pos < bytes.len() {
        let chunk = (bytes[*pos] as i64) - 63;
        *pos += 1;
        // A well-formed value fits in far fewer chunks; past 63 bits any
        // further continuation bytes are malformed and contribute nothing.
        if shift < 64 {
            value |= (chunk & 0x1f) << shift;
            shift += 5;
        }
        if chunk < 0x20 {
            break;
        }
    }
    if value & 1 == 1 { !(value >> 1) } else { value >> 1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_reference_polyline() {
        // The worked example from the polyline format documentation.
        let polyline = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        let points = polyline.points();
        assert_eq!(points.len(), 3);
        assert!((points[0].0 - 38.5).abs() < 1e-5);
        assert!((points[0].1 - -120.2).abs() < 1e-5);
        assert!((points[1].0 - 40.7).abs() < 1e-5);
        assert!((points[1].1 - -120.95).abs() < 1e-5);
        assert!((points[2].0 - 43.252).abs() < 1e-5);
        assert!((points[2].1 - -126.453).abs() < 1e-5);

        // Presentation takes the decoded geometry by value.
        let owned = polyline.into_points();
        assert_eq!(owned.len(), 3);
    }

    #[test]
    fn empty_input_gives_empty_geometry() {
        assert!(decode_polyline("").points().is_empty());
    }

    #[test]
    fn malformed_continuation_run_does_not_panic() {
        // Nothing but continuation bytes: no value ever terminates, and a
        // naive accumulator would overflow its shift.
        let garbage = "_".repeat(16);
        let polyline = decode_polyline(&garbage);
        assert_eq!(polyline.points().len(), 1);
    }

    #[test]
    fn truncated_input_stops_at_end_of_string() {
        // Valid first pair, then a dangling half-value.
        let polyline = decode_polyline("_p~iF~ps|U_");
        assert!(!polyline.points().is_empty());
    }
}
