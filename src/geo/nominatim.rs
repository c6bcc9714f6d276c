//! Nominatim provider (OpenStreetMap)
//!
//! Implements both POI search and reverse geocoding on the free Nominatim
//! `jsonv2` API. Usage policy requires an identifying User-Agent and at
//! most one request per second.

use crate::candidate::RemotePoi;
use crate::config::GeocodeConfig;
use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::coord::Coordinate;
use crate::error::{Error, Result};
use crate::geo::{AddressComponent, GeocodeResult, ReverseGeocoder, SearchProvider};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Nominatim address keys folded into each hierarchy level, most specific
/// first
const HIERARCHY_KEYS: &[(&str, &[&str])] = &[
    ("country", &["country"]),
    ("region", &["state", "province", "region"]),
    ("district", &["county", "state_district", "district"]),
    ("place", &["city", "town", "village", "municipality", "hamlet"]),
    ("locality", &["suburb", "city_district", "borough"]),
    ("neighborhood", &["neighbourhood", "quarter", "residential"]),
    ("postcode", &["postcode"]),
];

/// Nominatim backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim place as returned by `/search` and `/reverse`
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: u64,
    lat: String,
    lon: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, rename = "type")]
    place_type: Option<String>,
    #[serde(default)]
    address: HashMap<String, String>,
}

/// `/reverse` answers 200 with an error body when nothing is at the point
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Place(NominatimPlace),
    Error { error: String },
}

impl NominatimBackend {
    /// Create a backend from geocode settings
    pub fn new(config: &GeocodeConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Parse lat/lng strings into a coordinate
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinate> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geocoding(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinate::new(lat, lng))
    }

    /// Bounding box (`left,top,right,bottom`) covering a circle
    fn viewbox(center: Coordinate, radius_meters: f64) -> String {
        let dlat = radius_meters / METERS_PER_DEGREE_LAT;
        // Keep the box finite near the poles
        let cos_lat = center.latitude.to_radians().cos().abs().max(0.01);
        let dlng = radius_meters / (METERS_PER_DEGREE_LAT * cos_lat);

        format!(
            "{},{},{},{}",
            (center.longitude - dlng).max(-180.0),
            (center.latitude + dlat).min(90.0),
            (center.longitude + dlng).min(180.0),
            (center.latitude - dlat).max(-90.0),
        )
    }

    /// "12 Main Street" style line from address details
    fn street_line(address: &HashMap<String, String>) -> Option<String> {
        match (address.get("house_number"), address.get("road")) {
            (Some(number), Some(road)) => Some(format!("{} {}", number, road)),
            (None, Some(road)) => Some(road.clone()),
            _ => None,
        }
    }

    fn components(address: &HashMap<String, String>) -> Vec<AddressComponent> {
        HIERARCHY_KEYS
            .iter()
            .filter_map(|(kind, keys)| {
                keys.iter()
                    .find_map(|key| address.get(*key))
                    .map(|text| AddressComponent::new(*kind, text.clone()))
            })
            .collect()
    }

    fn non_empty(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    fn to_poi(place: NominatimPlace) -> Result<RemotePoi> {
        let coordinate = Self::parse_coords(&place.lat, &place.lon)?;
        let address = Self::street_line(&place.address);
        let display_name = Self::non_empty(place.display_name);

        let name = Self::non_empty(place.name)
            .or_else(|| {
                display_name
                    .as_deref()
                    .and_then(|d| d.split(',').next())
                    .map(|s| s.trim().to_string())
            })
            .unwrap_or_default();

        Ok(RemotePoi {
            id: place.place_id.to_string(),
            name,
            coordinate,
            address: address.or(display_name),
            category: place.place_type,
            distance_meters: None,
        })
    }

    fn to_geocode_result(place: NominatimPlace) -> GeocodeResult {
        GeocodeResult {
            name: Self::non_empty(place.name),
            address: Self::street_line(&place.address),
            components: Self::components(&place.address),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::ProviderUnavailable(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ProviderUnavailable(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl SearchProvider for NominatimBackend {
    async fn search(
        &self,
        center: Coordinate,
        radius_meters: f64,
        query: Option<&str>,
        limit: u32,
    ) -> Result<Vec<RemotePoi>> {
        // Nominatim has no query-less "what's nearby" lookup
        let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) else {
            debug!("No search query, skipping Nominatim search");
            return Ok(Vec::new());
        };

        let url = format!(
            "{}/search?q={}&format=jsonv2&addressdetails=1&limit={}&bounded=1&viewbox={}",
            self.base_url,
            urlencoding::encode(query),
            limit,
            Self::viewbox(center, radius_meters)
        );

        let values: Vec<serde_json::Value> = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        // One unparseable hit must not sink the whole result set
        Ok(values
            .into_iter()
            .filter_map(|value| {
                serde_json::from_value::<NominatimPlace>(value)
                    .map_err(|e| Error::Geocoding(format!("Unexpected Nominatim result: {}", e)))
                    .and_then(Self::to_poi)
                    .map_err(|e| debug!(error = %e, "Skipping malformed Nominatim result"))
                    .ok()
            })
            .collect())
    }
}

impl ReverseGeocoder for NominatimBackend {
    async fn reverse_geocode(&self, coordinate: Coordinate) -> Result<GeocodeResult> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2&addressdetails=1",
            self.base_url, coordinate.latitude, coordinate.longitude
        );

        let response: ReverseResponse = self
            .get(&url)
            .await?
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))?;

        match response {
            ReverseResponse::Place(place) => Ok(Self::to_geocode_result(place)),
            ReverseResponse::Error { error } => {
                debug!(%coordinate, error = %error, "Nothing to reverse geocode at point");
                Ok(GeocodeResult::default())
            }
        }
    }
}
