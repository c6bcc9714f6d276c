//! Coordinates, viewports and the geometric policies built on them
//!
//! This module handles:
//! - Great-circle distance between coordinates
//! - Deriving a search radius from the visible map area
//! - The street/city/state zoom cycle for repeated activations

pub mod distance;
pub mod radius;
pub mod zoom;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create new coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    ///
    /// NaN fails both range checks and is rejected too.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Whether both components are in range
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// The visible map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: Coordinate,
    pub latitude_span_degrees: f64,
    pub longitude_span_degrees: f64,
}

impl Viewport {
    /// Create a viewport around a center
    pub fn new(center: Coordinate, latitude_span_degrees: f64, longitude_span_degrees: f64) -> Self {
        Self {
            center,
            latitude_span_degrees,
            longitude_span_degrees,
        }
    }

    /// Square viewport with the same span on both axes
    pub fn square(center: Coordinate, span_degrees: f64) -> Self {
        Self::new(center, span_degrees, span_degrees)
    }

    /// Validate the center and spans
    pub fn validate(&self) -> Result<()> {
        self.center.validate()?;
        if !self.latitude_span_degrees.is_finite() || !self.longitude_span_degrees.is_finite() {
            return Err(Error::InvalidCoordinates(
                "Viewport span must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
