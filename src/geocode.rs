//! Geocoding and place-autocomplete HTTP adapters (Google-style APIs).
//!
//! Transport failures and non-OK statuses degrade to "no result" so the
//! planner can report them uniformly as geocode failures; upstream
//! presentation offers a retry.

use serde::Deserialize;
use tracing::warn;

use crate::model::{Coordinate, PlaceSuggestion};
use crate::traits::{Geocoder, PlaceSuggester};

#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Forward/reverse geocoder over the Google Geocoding API shape.
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    config: GeocodeConfig,
    client: reqwest::blocking::Client,
}

impl GoogleGeocoder {
    pub fn new(config: GeocodeConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn fetch(&self, param: (&str, &str)) -> Option<GeocodeResponse> {
        let url = format!("{}/maps/api/geocode/json", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[param, ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<GeocodeResponse>());

        match response {
            Ok(body) if body.status == "OK" => Some(body),
            Ok(body) => {
                warn!(status = %body.status, "geocode returned no result");
                None
            }
            Err(err) => {
                warn!(%err, "geocode request failed");
                None
            }
        }
    }
}

impl Geocoder for GoogleGeocoder {
    fn forward(&self, address: &str) -> Option<Coordinate> {
        if address.trim().is_empty() {
            return None;
        }
        let body = self.fetch(("address", address))?;
        let location = body.results.into_iter().next()?.geometry.location;
        Some(Coordinate::new(location.lat, location.lng))
    }

    fn reverse(&self, coordinate: Coordinate) -> Option<String> {
        let latlng = format!("{:.6},{:.6}", coordinate.latitude, coordinate.longitude);
        let body = self.fetch(("latlng", latlng.as_str()))?;
        body.results
            .into_iter()
            .next()?
            .formatted_address
            .filter(|addr| !addr.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

/// Place autocomplete + details over the Google Places REST shape.
#[derive(Debug, Clone)]
pub struct GooglePlaces {
    config: GeocodeConfig,
    client: reqwest::blocking::Client,
}

impl GooglePlaces {
    pub fn new(config: GeocodeConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }
}

impl PlaceSuggester for GooglePlaces {
    fn suggest(&self, input: &str) -> Vec<PlaceSuggestion> {
        if input.trim().is_empty() {
            return Vec::new();
        }
        let url = format!("{}/maps/api/place/autocomplete/json", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("input", input), ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<AutocompleteResponse>());

        match response {
            Ok(body) if body.status == "OK" => body
                .predictions
                .into_iter()
                .map(|p| PlaceSuggestion {
                    description: p.description,
                    main_text: p.structured_formatting.main_text,
                    secondary_text: p.structured_formatting.secondary_text,
                    place_id: p.place_id,
                })
                .collect(),
            Ok(_) => Vec::new(),
            Err(err) => {
                warn!(%err, "place autocomplete request failed");
                Vec::new()
            }
        }
    }

    fn details(&self, place_id: &str) -> Option<Coordinate> {
        if place_id.is_empty() {
            return None;
        }
        let url = format!("{}/maps/api/place/details/json", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("place_id", place_id), ("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<DetailsResponse>());

        match response {
            Ok(body) if body.status == "OK" => {
                let location = body.result?.geometry.location;
                Some(Coordinate::new(location.lat, location.lng))
            }
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "place details request failed");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    description: String,
    place_id: String,
    #[serde(default)]
    structured_formatting: StructuredFormatting,
}

#[derive(Debug, Deserialize, Default)]
struct StructuredFormatting {
    #[serde(default)]
    main_text: String,
    #[serde(default)]
    secondary_text: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    geometry: Geometry,
}
