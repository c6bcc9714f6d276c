//! Output formatters
//!
//! Provides trait-based output formatting for resolution reports.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::candidate::resolver::ResolutionReport;
use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format a resolution report
    ///
    /// # Arguments
    /// * `report` - The resolution pass to format
    /// * `config` - Application config (for url providers, etc.)
    fn format(&self, report: &ResolutionReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "json".to_string(),
            description: "Full JSON report".to_string(),
        },
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "gpx".to_string(),
            description: "GPX waypoint file".to_string(),
        },
        FormatInfo {
            name: "url".to_string(),
            description: "Map URL for the nearest candidate".to_string(),
        },
    ]
}

/// Human-readable distance: meters below 1 km, kilometers above
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters >= crate::candidate::source::UNKNOWN_DISTANCE {
        "?".to_string()
    } else if meters < 1_000.0 {
        format!("{:.0} m", meters)
    } else {
        format!("{:.1} km", meters / 1_000.0)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::candidate::resolver::{resolve, ResolutionReport};
    use crate::candidate::{PendingTap, RemotePoi, SavedPlace};
    use crate::coord::radius::radius_meters;
    use crate::coord::{Coordinate, Viewport};

    /// Small report: a tapped cafe, a saved home and one search hit
    pub fn sample_report() -> ResolutionReport {
        let center = Coordinate::new(40.7128, -74.0060);
        let viewport = Viewport::square(center, 0.05);
        let tap = PendingTap::new(center).with_place("osm:1", "Corner Cafe");
        let saved = [SavedPlace::new("home", "Home", Coordinate::new(40.7200, -74.0060))
            .with_address("1 Main St")
            .with_entry_count(3)];
        let search = [RemotePoi::new("42", "Big Park", Coordinate::new(40.7300, -74.0100))
            .with_category("park")];

        ResolutionReport {
            id: "report-1".to_string(),
            generated_at: "2024-05-01T12:00:00+00:00".to_string(),
            viewport,
            query: None,
            radius_meters: radius_meters(&viewport),
            search_degraded: false,
            candidates: resolve(&viewport, None, Some(&tap), &saved, &search),
        }
    }

    pub fn empty_report() -> ResolutionReport {
        ResolutionReport {
            candidates: Vec::new(),
            ..sample_report()
        }
    }
}
