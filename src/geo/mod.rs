//! Geocoding module
//!
//! Provides geocoding (address to coordinates), reverse geocoding and IP
//! geolocation, plus the [`GeocodingClient`] that applies the map screen's
//! absorb-and-log policy on top of a backend.

pub mod client;
pub mod ip_location;
pub mod nominatim;

pub use client::GeocodingClient;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A geocoded location result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Display name (address or description)
    pub display_name: String,
    /// Street name, when the provider breaks the address down
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Building number on the street
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
}

impl GeoLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }

    /// Short address shown under the map pin
    ///
    /// "street, number" when both are known, "street" alone, otherwise empty.
    pub fn address_label(&self) -> String {
        match (&self.street, &self.house_number) {
            (Some(street), Some(number)) => format!("{}, {}", street, number),
            (Some(street), None) => street.clone(),
            _ => String::new(),
        }
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Geocode a location string to coordinates
    ///
    /// Returns the best match for the query, or None if not found
    fn geocode(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;

    /// Reverse geocode coordinates to a location name
    fn reverse_geocode(
        &self,
        lat: f64,
        lng: f64,
    ) -> impl std::future::Future<Output = Result<Option<GeoLocation>>> + Send;
}

/// Get the default geocoding backend
pub fn get_geocoder(base_url: &str) -> Result<nominatim::NominatimBackend> {
    nominatim::NominatimBackend::with_base_url(base_url)
}

/// Get the IP location service
pub fn get_ip_locator() -> Result<ip_location::IpLocator> {
    ip_location::IpLocator::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_location_serialization() {
        let loc = GeoLocation {
            lat: 40.7128,
            lng: -74.0060,
            display_name: "New York City".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_string(&loc).unwrap();
        assert!(!json.contains("street"));
        let parsed: GeoLocation = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.lat, 40.7128);
        assert_eq!(parsed.display_name, "New York City");
    }

    #[test]
    fn test_address_label() {
        let mut loc = GeoLocation {
            street: Some("Tverskaya".to_string()),
            house_number: Some("7".to_string()),
            ..Default::default()
        };
        assert_eq!(loc.address_label(), "Tverskaya, 7");

        loc.house_number = None;
        assert_eq!(loc.address_label(), "Tverskaya");

        loc.street = None;
        loc.house_number = Some("7".to_string());
        assert_eq!(loc.address_label(), "");
    }
}
