//! Centralized constants for the place-resolver crate
//!
//! Values shared by more than one module live here so the geometry,
//! ranking and provider code agree on them.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// Candidate matching and ranking
pub mod matching {
    /// Two same-named candidates closer than this are one place (~300 ft)
    pub const SAME_PLACE_METERS: f64 = 91.0;
}

/// Search radius bounds
pub mod search {
    /// Smallest radius ever sent to a search provider
    pub const MIN_RADIUS_METERS: f64 = 500.0;

    /// Largest radius ever sent to a search provider
    pub const MAX_RADIUS_METERS: f64 = 10_000.0;

    /// Default number of search results to request
    pub const DEFAULT_LIMIT: u32 = 25;
}

/// Zoom cycle spans (degrees of latitude/longitude shown)
pub mod zoom {
    pub const STREET_SPAN_DEGREES: f64 = 0.005;
    pub const CITY_SPAN_DEGREES: f64 = 0.05;
    pub const STATE_SPAN_DEGREES: f64 = 2.0;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
}
