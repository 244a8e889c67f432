//! Centralized constants for the my-places crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in meters (WGS84 approximation)
    pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

    /// Meters per degree of latitude (approximate, varies slightly with latitude)
    pub const METERS_PER_DEGREE_LAT: f64 = 111_320.0;
}

/// Map behaviour
pub mod map {
    /// Side length of the region shown around the user
    pub const REGION_IN_METERS: f64 = 1000.0;

    /// Map panning below this distance does not trigger a recentre
    pub const RECENTRE_THRESHOLD_METERS: f64 = 50.0;

    /// Delay before snapping the map back to the user after panning
    pub const RECENTRE_DELAY_SECS: u64 = 3;
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Public OSRM routing server
    pub const OSRM_URL: &str = "https://router.project-osrm.org";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";
}

/// Cache settings
pub mod cache {
    /// IP location cache duration in seconds (1 hour)
    pub const IP_LOCATION_TTL_SECS: u64 = 3600;

    /// IP location cache file name
    pub const IP_LOCATION_CACHE_FILE: &str = "ip_location_cache.json";
}

/// User-facing alert text
pub mod alerts {
    pub const SERVICES_DISABLED_TITLE: &str = "Location Services are Disabled";
    pub const SERVICES_DISABLED_MESSAGE: &str =
        "To enable it go: Settings -> Privacy -> Location Services and turn ON.";
    pub const ERROR_TITLE: &str = "Error";
}
