//! Output formatters
//!
//! Render a computed route to a place in one of several formats.

pub mod gpx;
pub mod json;
pub mod text;
pub mod url;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::places::Place;
use crate::route::{Route, RouteSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Directions from a position to a saved place
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteReport {
    pub place_id: String,
    pub place_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub routes: Vec<Route>,
    pub generated_at: DateTime<Utc>,
}

impl RouteReport {
    pub fn new(
        place: &Place,
        origin: Coordinates,
        destination: Coordinates,
        routes: Vec<Route>,
    ) -> Self {
        Self {
            place_id: place.id.clone(),
            place_name: place.name.clone(),
            place_type: place.place_type.clone(),
            origin,
            destination,
            routes,
            generated_at: Utc::now(),
        }
    }

    pub fn summaries(&self) -> Vec<RouteSummary> {
        self.routes.iter().map(Route::summary).collect()
    }
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Format the report
    ///
    /// `config` supplies the map URL providers.
    fn format(&self, report: &RouteReport, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "gpx" => Some(Box::new(gpx::GpxFormatter)),
        "url" => Some(Box::new(url::UrlFormatter)),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    ["json", "text", "gpx", "url"]
        .iter()
        .filter_map(|name| get_formatter(name))
        .map(|f| FormatInfo {
            name: f.name().to_string(),
            description: f.description().to_string(),
        })
        .collect()
}

#[cfg(test)]
pub(crate) fn sample_report() -> RouteReport {
    use crate::coord::Polyline;

    let place = Place::new("Pushkin Cafe").unwrap().with_type("Cafe");
    let origin = Coordinates::new(55.7558, 37.6173);
    let destination = Coordinates::new(55.7637, 37.6050);
    let polyline = Polyline::new(vec![origin, Coordinates::new(55.7601, 37.6110), destination]);
    RouteReport::new(
        &place,
        origin,
        destination,
        vec![Route {
            polyline,
            distance_meters: 1840.0,
            expected_travel_secs: 390.0,
        }],
    )
}
