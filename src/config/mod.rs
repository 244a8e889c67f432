//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/my-places/config.toml

pub mod defaults;

use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default CLI values
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Map screen behaviour
    #[serde(default)]
    pub map: MapConfig,

    /// Geocoding service
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Routing service
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Place catalogue location
    #[serde(default)]
    pub storage: StorageConfig,

    /// URL generation settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Default CLI values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default route output format
    #[serde(default = "default_format")]
    pub format: String,
}

/// Map screen behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Side of the region shown around the user, in meters
    #[serde(default = "default_region_meters")]
    pub region_meters: f64,

    /// Panning distance that triggers a recentre, in meters
    #[serde(default = "default_recentre_threshold")]
    pub recentre_threshold_meters: f64,

    /// Wait before snapping back to the user, in seconds
    #[serde(default = "default_recentre_delay")]
    pub recentre_delay_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Nominatim-compatible base URL
    #[serde(default = "default_geocoding_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// OSRM-compatible base URL
    #[serde(default = "default_routing_url")]
    pub url: String,
}

/// Place catalogue location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the XDG data path when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub places_file: Option<PathBuf>,
}

/// URL generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}
fn default_region_meters() -> f64 {
    DEFAULT_REGION_METERS
}
fn default_recentre_threshold() -> f64 {
    DEFAULT_RECENTRE_THRESHOLD_METERS
}
fn default_recentre_delay() -> u64 {
    DEFAULT_RECENTRE_DELAY_SECS
}
fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}
fn default_routing_url() -> String {
    DEFAULT_ROUTING_URL.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},15z".to_string(),
    );
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=18/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            region_meters: default_region_meters(),
            recentre_threshold_meters: default_recentre_threshold(),
            recentre_delay_secs: default_recentre_delay(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            url: default_geocoding_url(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            url: default_routing_url(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid value for {}: {}", key, value)))
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

            let config: Config = toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&path, content)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject values the map screen cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.map.region_meters.is_nan() || self.map.region_meters <= 0.0 {
            return Err(Error::Config(format!(
                "map.region_meters must be positive, got {}",
                self.map.region_meters
            )));
        }
        if self.map.recentre_threshold_meters.is_nan() || self.map.recentre_threshold_meters < 0.0 {
            return Err(Error::Config(format!(
                "map.recentre_threshold_meters must not be negative, got {}",
                self.map.recentre_threshold_meters
            )));
        }
        Ok(())
    }

    /// Resolved path of the place catalogue, if overridden
    pub fn places_file(&self) -> Option<PathBuf> {
        self.storage.places_file.clone()
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => Some(self.defaults.format.clone()),

            ["map", "region_meters"] => Some(self.map.region_meters.to_string()),
            ["map", "recentre_threshold_meters"] => {
                Some(self.map.recentre_threshold_meters.to_string())
            }
            ["map", "recentre_delay_secs"] => Some(self.map.recentre_delay_secs.to_string()),

            ["geocoding", "url"] => Some(self.geocoding.url.clone()),
            ["routing", "url"] => Some(self.routing.url.clone()),

            ["storage", "places_file"] => Some(
                self.storage
                    .places_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["defaults", "format"] => {
                self.defaults.format = value.to_string();
            }

            ["map", "region_meters"] => {
                self.map.region_meters = parse(key, value)?;
            }
            ["map", "recentre_threshold_meters"] => {
                self.map.recentre_threshold_meters = parse(key, value)?;
            }
            ["map", "recentre_delay_secs"] => {
                self.map.recentre_delay_secs = parse(key, value)?;
            }

            ["geocoding", "url"] => {
                self.geocoding.url = value.to_string();
            }
            ["routing", "url"] => {
                self.routing.url = value.to_string();
            }

            ["storage", "places_file"] => {
                self.storage.places_file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        self.validate()
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "defaults.format",
            "map.region_meters",
            "map.recentre_threshold_meters",
            "map.recentre_delay_secs",
            "geocoding.url",
            "routing.url",
            "storage.places_file",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self
            .url
            .providers
            .get(provider_name)
            .ok_or_else(|| Error::Config(format!("Unknown URL provider: {}", provider_name)))?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }
}
