//! place-resolver: map location resolution
//!
//! A library and CLI tool that turns what a map user is looking at (a
//! viewport, an optional search query, an optional tapped point) into a
//! ranked, deduplicated list of candidate places, then enriches the chosen
//! candidate with a reverse-geocoded address hierarchy.
//!
//! ## Features
//!
//! - Viewport-derived search radius, clamped to a sane range
//! - Merging of saved places, map taps and search hits with dedupe
//! - Stale-safe reverse geocoding driven by generation tickets
//! - Saved-place store, HTTP API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use place_resolver::candidate::resolver::resolve;
//! use place_resolver::candidate::{PendingTap, RemotePoi, SavedPlace};
//! use place_resolver::coord::{Coordinate, Viewport};
//!
//! let center = Coordinate::new(40.7128, -74.0060); // NYC
//! let viewport = Viewport::square(center, 0.05);
//!
//! let saved = [SavedPlace::new("home", "Home", Coordinate::new(40.7130, -74.0060))];
//! let search = [RemotePoi::new("1", "Joe's Pizza", Coordinate::new(40.7140, -74.0050))];
//! let tap = PendingTap::new(center);
//!
//! let candidates = resolve(&viewport, None, Some(&tap), &saved, &search);
//! assert_eq!(candidates.len(), 3);
//! assert_eq!(candidates[0].distance_meters, 0.0);
//! ```

pub mod candidate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod enrich;
pub mod error;
pub mod format;
pub mod geo;
pub mod places;
pub mod server;

// Re-export commonly used types
pub use candidate::resolver::{resolve, ResolutionReport, Resolver};
pub use candidate::{LocationCandidate, PendingTap, RemotePoi, SavedPlace};
pub use config::Config;
pub use coord::{Coordinate, Viewport};
pub use enrich::{EnrichmentStatus, ResolvedLocation};
pub use error::{Error, Result};
