//! Search radius derived from the visible map area
//!
//! The radius covers half the viewport width so a search spans what the
//! user can see, bounded so a remote query is never near-zero or huge.

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use crate::constants::search::{MAX_RADIUS_METERS, MIN_RADIUS_METERS};
use crate::coord::Viewport;
use serde::{Deserialize, Serialize};

/// Bounds applied to the viewport-derived radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusPolicy {
    pub min_meters: f64,
    pub max_meters: f64,
}

impl Default for RadiusPolicy {
    fn default() -> Self {
        Self {
            min_meters: MIN_RADIUS_METERS,
            max_meters: MAX_RADIUS_METERS,
        }
    }
}

impl RadiusPolicy {
    /// Create a policy, swapping the bounds if given in the wrong order
    pub fn new(min_meters: f64, max_meters: f64) -> Self {
        if min_meters <= max_meters {
            Self {
                min_meters,
                max_meters,
            }
        } else {
            Self {
                min_meters: max_meters,
                max_meters: min_meters,
            }
        }
    }

    /// Approximate visible width of the viewport in meters
    pub fn viewport_width_meters(viewport: &Viewport) -> f64 {
        viewport.longitude_span_degrees.abs()
            * METERS_PER_DEGREE_LAT
            * viewport.center.latitude.to_radians().cos().abs()
    }

    /// Search radius for a viewport, always within `[min_meters, max_meters]`
    pub fn radius_meters(&self, viewport: &Viewport) -> f64 {
        let half_width = Self::viewport_width_meters(viewport) / 2.0;
        if half_width.is_nan() {
            return self.min_meters;
        }
        half_width.clamp(self.min_meters, self.max_meters)
    }
}

/// Search radius for a viewport using the default bounds
pub fn radius_meters(viewport: &Viewport) -> f64 {
    RadiusPolicy::default().radius_meters(viewport)
}
