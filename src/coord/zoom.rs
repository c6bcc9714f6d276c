//! Street -> City -> State zoom cycling
//!
//! Activating the same candidate twice in a row zooms one level further
//! out; activating a different candidate starts again at street level.

use crate::constants::zoom::{CITY_SPAN_DEGREES, STATE_SPAN_DEGREES, STREET_SPAN_DEGREES};
use crate::coord::{Coordinate, Viewport};
use serde::{Deserialize, Serialize};

/// Zoom level the map is re-centered at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoomLevel {
    Street,
    City,
    State,
}

impl ZoomLevel {
    /// Viewport span in degrees for this level
    pub fn span_degrees(self) -> f64 {
        match self {
            Self::Street => STREET_SPAN_DEGREES,
            Self::City => CITY_SPAN_DEGREES,
            Self::State => STATE_SPAN_DEGREES,
        }
    }

    /// The following level, wrapping State back to Street
    pub fn next(self) -> Self {
        match self {
            Self::Street => Self::City,
            Self::City => Self::State,
            Self::State => Self::Street,
        }
    }

    /// Viewport centered on `center` at this level
    pub fn viewport(self, center: Coordinate) -> Viewport {
        Viewport::square(center, self.span_degrees())
    }
}

impl std::fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Street => write!(f, "street"),
            Self::City => write!(f, "city"),
            Self::State => write!(f, "state"),
        }
    }
}

/// Tracks the last activated candidate and its zoom level
#[derive(Debug, Clone, Default)]
pub struct ZoomCycle {
    last: Option<(String, ZoomLevel)>,
}

impl ZoomCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an activation of `candidate_id` and return the level to show
    pub fn activate(&mut self, candidate_id: &str) -> ZoomLevel {
        let level = match &self.last {
            Some((last_id, level)) if last_id == candidate_id => level.next(),
            _ => ZoomLevel::Street,
        };
        self.last = Some((candidate_id.to_string(), level));
        level
    }

    /// Current level, if anything has been activated
    pub fn current(&self) -> Option<ZoomLevel> {
        self.last.as_ref().map(|(_, level)| *level)
    }

    /// Forget the last activation
    pub fn reset(&mut self) {
        self.last = None;
    }
}
