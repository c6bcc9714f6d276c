//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/place-resolver/config.toml

pub mod defaults;

use crate::constants::api::NOMINATIM_URL;
use crate::coord::radius::RadiusPolicy;
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Candidate search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Geocoding provider settings
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// Saved-place store settings
    #[serde(default)]
    pub places: PlacesConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Candidate search settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Maximum number of search results requested
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Smallest search radius in meters
    #[serde(default = "default_min_radius")]
    pub min_radius: f64,

    /// Largest search radius in meters
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,

    /// Viewport span in degrees when only a center is given
    #[serde(default = "default_span")]
    pub default_span: f64,
}

/// Geocoding provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Provider base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Seconds to wait for a provider response
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent with provider requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Saved-place store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Store file path (defaults to the XDG data directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}
fn default_min_radius() -> f64 {
    DEFAULT_MIN_RADIUS
}
fn default_max_radius() -> f64 {
    DEFAULT_MAX_RADIUS
}
fn default_span() -> f64 {
    DEFAULT_SPAN
}
fn default_base_url() -> String {
    NOMINATIM_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_GEOCODE_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/search/?api=1&query={lat},{lng}".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
            default_span: default_span(),
        }
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl SearchConfig {
    /// Radius bounds as a policy
    pub fn radius_policy(&self) -> RadiusPolicy {
        RadiusPolicy::new(self.min_radius, self.max_radius)
    }
}

impl GeocodeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "limit"] => Some(self.search.limit.to_string()),
            ["search", "min_radius"] => Some(self.search.min_radius.to_string()),
            ["search", "max_radius"] => Some(self.search.max_radius.to_string()),
            ["search", "default_span"] => Some(self.search.default_span.to_string()),

            ["geocode", "base_url"] => Some(self.geocode.base_url.clone()),
            ["geocode", "timeout_secs"] => Some(self.geocode.timeout_secs.to_string()),
            ["geocode", "user_agent"] => Some(self.geocode.user_agent.clone()),

            ["places", "path"] => Some(self.places.path.clone().unwrap_or_default()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["output", "format"] => Some(self.output.format.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["search", "limit"] => {
                self.search.limit = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid limit value: {}", value)))?;
            }
            ["search", "min_radius"] => {
                self.search.min_radius = parse_radius(value)?;
            }
            ["search", "max_radius"] => {
                self.search.max_radius = parse_radius(value)?;
            }
            ["search", "default_span"] => {
                self.search.default_span = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid span value: {}", value)))?;
            }

            ["geocode", "base_url"] => {
                self.geocode.base_url = value.to_string();
            }
            ["geocode", "timeout_secs"] => {
                self.geocode.timeout_secs = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid timeout value: {}", value)))?;
            }
            ["geocode", "user_agent"] => {
                self.geocode.user_agent = value.to_string();
            }

            ["places", "path"] => {
                self.places.path = (!value.is_empty()).then(|| value.to_string());
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid port value: {}", value)))?;
            }

            ["output", "format"] => {
                self.output.format = value.to_string();
            }

            ["url", "default"] => {
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "search.limit",
            "search.min_radius",
            "search.max_radius",
            "search.default_span",
            "geocode.base_url",
            "geocode.timeout_secs",
            "geocode.user_agent",
            "places.path",
            "server.host",
            "server.port",
            "output.format",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_radius(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(radius) if radius.is_finite() && radius > 0.0 => Ok(radius),
        _ => Err(Error::Config(format!("Invalid radius value: {}", value))),
    }
}
