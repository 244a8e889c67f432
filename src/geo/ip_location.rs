//! IP-based geolocation
//!
//! Stands in for a device position fix when running from a terminal.
//! Uses ip-api.com with a small file cache.

use crate::constants::api::IP_API_URL;
use crate::constants::cache::{IP_LOCATION_CACHE_FILE, IP_LOCATION_TTL_SECS};
use crate::error::{Error, Result};
use crate::geo::GeoLocation;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// IP location service with caching
#[derive(Debug)]
pub struct IpLocator {
    client: reqwest::Client,
    cache_path: Option<PathBuf>,
}

/// ip-api.com response
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    country: Option<String>,
}

/// Cached position fix
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedFix {
    location: GeoLocation,
    fetched_at: i64,
}

impl CachedFix {
    fn is_fresh(&self, now: i64) -> bool {
        now - self.fetched_at < IP_LOCATION_TTL_SECS as i64
    }
}

impl IpLocator {
    /// Create a locator caching under the user cache directory
    pub fn new() -> Result<Self> {
        let cache_path = dirs::cache_dir()
            .map(|p| p.join(crate::config::defaults::APP_DIR_NAME).join(IP_LOCATION_CACHE_FILE));
        Self::build(cache_path)
    }

    /// Create a locator with a specific cache path
    pub fn with_cache_path(cache_path: PathBuf) -> Result<Self> {
        Self::build(Some(cache_path))
    }

    /// Create a locator that always hits the network
    pub fn without_cache() -> Result<Self> {
        Self::build(None)
    }

    fn build(cache_path: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            cache_path,
        })
    }

    /// Current position based on the public IP address
    pub async fn locate(&self) -> Result<GeoLocation> {
        if let Some(cached) = self.load_cache() {
            debug!("Using cached IP location: {}", cached.display_name);
            return Ok(cached);
        }

        let location = self.fetch_location().await?;
        self.save_cache(&location);
        Ok(location)
    }

    async fn fetch_location(&self) -> Result<GeoLocation> {
        let response = self
            .client
            .get(IP_API_URL)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("IP location request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Provider(format!(
                "IP location API returned status: {}",
                response.status()
            )));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("Failed to parse IP location response: {}", e)))?;

        Self::into_location(data)
    }

    fn into_location(data: IpApiResponse) -> Result<GeoLocation> {
        if data.status != "success" {
            return Err(Error::CurrentLocationUnavailable);
        }

        let (Some(lat), Some(lng)) = (data.lat, data.lon) else {
            return Err(Error::CurrentLocationUnavailable);
        };

        let display_name = [data.city, data.region_name, data.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        Ok(GeoLocation {
            lat,
            lng,
            display_name: if display_name.is_empty() {
                "Unknown Location".to_string()
            } else {
                display_name
            },
            ..Default::default()
        })
    }

    fn load_cache(&self) -> Option<GeoLocation> {
        let content = fs::read_to_string(self.cache_path.as_ref()?).ok()?;
        let cached: CachedFix = serde_json::from_str(&content).ok()?;
        cached
            .is_fresh(Utc::now().timestamp())
            .then_some(cached.location)
    }

    fn save_cache(&self, location: &GeoLocation) {
        let Some(cache_path) = &self.cache_path else {
            return;
        };

        if let Some(parent) = cache_path.parent() {
            let _ = fs::create_dir_all(parent);
        }

        let cached = CachedFix {
            location: location.clone(),
            fetched_at: Utc::now().timestamp(),
        };

        if let Ok(content) = serde_json::to_string_pretty(&cached) {
            let _ = fs::write(cache_path, content);
        }
    }

    /// Remove the cached fix
    pub fn clear_cache(&self) {
        if let Some(cache_path) = &self.cache_path {
            let _ = fs::remove_file(cache_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_without_cache() {
        let locator = IpLocator::without_cache().unwrap();
        assert!(locator.cache_path.is_none());
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_cache_operations() {
        let temp_dir = TempDir::new().unwrap();
        let locator = IpLocator::with_cache_path(temp_dir.path().join("fix.json")).unwrap();

        assert!(locator.load_cache().is_none());

        let location = GeoLocation {
            lat: 55.7558,
            lng: 37.6173,
            display_name: "Moscow".to_string(),
            ..Default::default()
        };
        locator.save_cache(&location);

        let loaded = locator.load_cache().unwrap();
        assert_eq!(loaded.lat, 55.7558);
        assert_eq!(loaded.display_name, "Moscow");

        locator.clear_cache();
        assert!(locator.load_cache().is_none());
    }

    #[test]
    fn test_stale_fix() {
        let fix = CachedFix {
            location: GeoLocation::default(),
            fetched_at: 1_000,
        };
        assert!(fix.is_fresh(1_000 + IP_LOCATION_TTL_SECS as i64 - 1));
        assert!(!fix.is_fresh(1_000 + IP_LOCATION_TTL_SECS as i64));
    }

    #[test]
    fn test_failed_lookup_is_unavailable() {
        let data = IpApiResponse {
            status: "fail".to_string(),
            lat: None,
            lon: None,
            city: None,
            region_name: None,
            country: None,
        };
        assert!(matches!(
            IpLocator::into_location(data),
            Err(Error::CurrentLocationUnavailable)
        ));
    }

    #[test]
    fn test_display_name_join() {
        let data = IpApiResponse {
            status: "success".to_string(),
            lat: Some(1.0),
            lon: Some(2.0),
            city: Some("Minsk".to_string()),
            region_name: None,
            country: Some("Belarus".to_string()),
        };
        let location = IpLocator::into_location(data).unwrap();
        assert_eq!(location.display_name, "Minsk, Belarus");
    }
}
