//! my-places: a catalogue of places with directions to them
//!
//! A library and CLI tool for keeping a list of places of interest and for
//! the location and routing logic behind a map screen.
//!
//! ## Features
//!
//! - JSON-file place catalogue with sorting and search
//! - Address geocoding (Nominatim) and driving directions (OSRM)
//! - Location permission gate with deferred alerts
//! - Single-route coordination where newer requests supersede older ones
//! - Region tracking that snaps the map back to the user
//!
//! ## Quick Start
//!
//! ```rust
//! use my_places::coord::Coordinates;
//! use my_places::region::RegionTracker;
//!
//! let mut tracker = RegionTracker::default();
//! tracker.set_reference(Coordinates::new(55.7558, 37.6173));
//!
//! // A few meters of panning is ignored
//! assert!(!tracker.on_region_changed(Coordinates::new(55.7559, 37.6173)));
//! // A kilometer is not
//! assert!(tracker.on_region_changed(Coordinates::new(55.7648, 37.6173)));
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod generation;
pub mod geo;
pub mod location;
pub mod map;
pub mod places;
pub mod region;
pub mod route;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use map::{MapManager, MapMode};
pub use places::{Place, PlaceStore, SortKey};
