//! External location providers
//!
//! Defines the narrow interfaces the engine consumes (POI search and
//! reverse geocoding) and the provider-neutral geocode result shape.

pub mod nominatim;

use crate::candidate::RemotePoi;
use crate::config::GeocodeConfig;
use crate::coord::Coordinate;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One level of a reverse-geocoded address hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressComponent {
    /// Hierarchy level: country, region, district, place, locality,
    /// neighborhood, postcode or address. Other kinds are ignored.
    pub kind: String,
    pub text: String,
}

impl AddressComponent {
    pub fn new(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
        }
    }
}

/// Reverse geocode response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodeResult {
    /// Name of the feature at the point, if the provider knows one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Street-level address line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub components: Vec<AddressComponent>,
}

impl GeocodeResult {
    pub fn with_component(mut self, kind: &str, text: &str) -> Self {
        self.components.push(AddressComponent::new(kind, text));
        self
    }
}

/// Trait for POI search backends
pub trait SearchProvider: Send + Sync {
    /// Search for points of interest around `center`
    ///
    /// `query` is `None` when the user is just browsing the map.
    fn search(
        &self,
        center: Coordinate,
        radius_meters: f64,
        query: Option<&str>,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<RemotePoi>>> + Send;
}

/// Trait for reverse geocoding backends
pub trait ReverseGeocoder: Send + Sync {
    /// Reverse geocode a coordinate into an address hierarchy
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl std::future::Future<Output = Result<GeocodeResult>> + Send;
}

impl<T: ReverseGeocoder> ReverseGeocoder for Arc<T> {
    fn reverse_geocode(
        &self,
        coordinate: Coordinate,
    ) -> impl std::future::Future<Output = Result<GeocodeResult>> + Send {
        (**self).reverse_geocode(coordinate)
    }
}

/// Search provider that never returns anything, for offline resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSearch;

impl SearchProvider for NoSearch {
    async fn search(
        &self,
        _center: Coordinate,
        _radius_meters: f64,
        _query: Option<&str>,
        _limit: u32,
    ) -> Result<Vec<RemotePoi>> {
        Ok(Vec::new())
    }
}

/// Get the default provider (implements both traits)
pub fn get_provider(config: &GeocodeConfig) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::new(config)
}
