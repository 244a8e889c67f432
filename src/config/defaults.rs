//! Default configuration values

use crate::constants::{api, map};

/// Side of the region shown around the user, in meters
pub const DEFAULT_REGION_METERS: f64 = map::REGION_IN_METERS;

/// Panning distance that triggers a recentre, in meters
pub const DEFAULT_RECENTRE_THRESHOLD_METERS: f64 = map::RECENTRE_THRESHOLD_METERS;

/// Wait before snapping back to the user, in seconds
pub const DEFAULT_RECENTRE_DELAY_SECS: u64 = map::RECENTRE_DELAY_SECS;

/// Geocoding service base URL
pub const DEFAULT_GEOCODING_URL: &str = api::NOMINATIM_URL;

/// Routing service base URL
pub const DEFAULT_ROUTING_URL: &str = api::OSRM_URL;

/// Default output format for routes
pub const DEFAULT_FORMAT: &str = "text";

/// Default URL provider
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Place catalogue file name
pub const PLACES_FILE_NAME: &str = "places.json";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "my-places";
