//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::NOMINATIM_URL;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use serde::Deserialize;

const USER_AGENT: &str = concat!("my-places/", env!("CARGO_PKG_VERSION"));

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Nominatim search/reverse response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    address: Option<NominatimAddress>,
}

/// Address breakdown returned with `addressdetails=1`
#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    road: Option<String>,
    pedestrian: Option<String>,
    house_number: Option<String>,
}

impl NominatimBackend {
    /// Create a backend against the public Nominatim instance
    pub fn new() -> Result<Self> {
        Self::with_base_url(NOMINATIM_URL)
    }

    /// Create a backend against a specific Nominatim instance
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat.parse().map_err(|_| {
            Error::Provider(format!("Invalid latitude: {}", lat))
        })?;
        let lng: f64 = lng.parse().map_err(|_| {
            Error::Provider(format!("Invalid longitude: {}", lng))
        })?;
        Ok((lat, lng))
    }

    fn into_location(result: NominatimResult) -> Result<GeoLocation> {
        let (lat, lng) = Self::parse_coords(&result.lat, &result.lon)?;
        let address = result.address.unwrap_or_default();
        Ok(GeoLocation {
            lat,
            lng,
            display_name: result.display_name,
            street: address.road.or(address.pedestrian),
            house_number: address.house_number,
        })
    }
}

impl GeoBackend for NominatimBackend {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1&addressdetails=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Nominatim response: {}", e)))?;

        // Only the first candidate is used
        results
            .into_iter()
            .next()
            .map(Self::into_location)
            .transpose()
    }

    async fn reverse_geocode(&self, lat: f64, lng: f64) -> Result<Option<GeoLocation>> {
        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json&addressdetails=1",
            self.base_url, lat, lng
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            if response.status() == reqwest::StatusCode::NOT_FOUND {
                return Ok(None);
            }
            return Err(Error::Provider(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse Nominatim response: {}", e)))?;

        // Points in the ocean come back as {"error": "Unable to geocode"}
        if body.get("error").is_some() {
            return Ok(None);
        }

        let result: NominatimResult = serde_json::from_value(body)?;
        Self::into_location(result).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coords() {
        let (lat, lng) = NominatimBackend::parse_coords("40.7128", "-74.0060").unwrap();
        assert!((lat - 40.7128).abs() < 0.0001);
        assert!((lng - (-74.0060)).abs() < 0.0001);
    }

    #[test]
    fn test_parse_coords_invalid() {
        assert!(NominatimBackend::parse_coords("invalid", "0").is_err());
        assert!(NominatimBackend::parse_coords("0", "invalid").is_err());
    }

    #[test]
    fn test_address_details_mapping() {
        let json = r#"{
            "lat": "37.4224857",
            "lon": "-122.0855846",
            "display_name": "Google Building 41, 1600, Amphitheatre Parkway, Mountain View",
            "address": {"road": "Amphitheatre Parkway", "house_number": "1600"}
        }"#;
        let result: NominatimResult = serde_json::from_str(json).unwrap();
        let location = NominatimBackend::into_location(result).unwrap();

        assert_eq!(location.street.as_deref(), Some("Amphitheatre Parkway"));
        assert_eq!(location.address_label(), "Amphitheatre Parkway, 1600");
        assert!((location.lat - 37.422).abs() < 0.001);
    }

    #[test]
    fn test_missing_address_details() {
        let json = r#"{"lat": "1.0", "lon": "2.0", "display_name": "Somewhere"}"#;
        let result: NominatimResult = serde_json::from_str(json).unwrap();
        let location = NominatimBackend::into_location(result).unwrap();
        assert_eq!(location.address_label(), "");
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = NominatimBackend::with_base_url("http://localhost:8080/").unwrap();
        assert_eq!(backend.base_url, "http://localhost:8080");
    }
}
