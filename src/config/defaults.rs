//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::search::{DEFAULT_LIMIT, MAX_RADIUS_METERS, MIN_RADIUS_METERS};
use crate::constants::zoom::CITY_SPAN_DEGREES;

/// Default number of search results requested
pub const DEFAULT_SEARCH_LIMIT: u32 = DEFAULT_LIMIT;

/// Default lower bound for the search radius in meters
pub const DEFAULT_MIN_RADIUS: f64 = MIN_RADIUS_METERS;

/// Default upper bound for the search radius in meters
pub const DEFAULT_MAX_RADIUS: f64 = MAX_RADIUS_METERS;

/// Default viewport span in degrees when the CLI is given only a center
pub const DEFAULT_SPAN: f64 = CITY_SPAN_DEGREES;

/// Default reverse geocode timeout in seconds
pub const DEFAULT_GEOCODE_TIMEOUT_SECS: u64 = 10;

/// User-Agent sent to geocoding providers
pub const DEFAULT_USER_AGENT: &str = concat!("place-resolver/", env!("CARGO_PKG_VERSION"));

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7979;

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Saved-place store file name
pub const PLACES_FILE_NAME: &str = "places.json";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "place-resolver";
