//! OSRM routing backend
//!
//! Talks to the OSRM HTTP API (`/route/v1/driving`). The public demo server
//! is meant for light use only.

use crate::constants::api::OSRM_URL;
use crate::coord::{Coordinates, Polyline};
use crate::error::{Error, Result};
use crate::route::{Route, RouteBackend, RouteRequest, TransportMode};
use serde::Deserialize;

const USER_AGENT: &str = concat!("my-places/", env!("CARGO_PKG_VERSION"));

/// OSRM routing backend
#[derive(Debug, Clone)]
pub struct OsrmBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    distance: f64,
    duration: f64,
    geometry: OsrmGeometry,
}

/// GeoJSON LineString; positions are [lng, lat]
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

impl OsrmBackend {
    pub fn new() -> Result<Self> {
        Self::with_base_url(OSRM_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn profile(mode: TransportMode) -> &'static str {
        match mode {
            TransportMode::Automobile => "driving",
        }
    }

    fn route_url(&self, request: &RouteRequest) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?overview=full&geometries=geojson&alternatives={}",
            self.base_url,
            Self::profile(request.transport),
            request.origin.lng,
            request.origin.lat,
            request.destination.lng,
            request.destination.lat,
            request.alternates
        )
    }

    fn into_routes(response: OsrmResponse) -> Result<Vec<Route>> {
        match response.code.as_str() {
            "Ok" => Ok(response
                .routes
                .into_iter()
                .map(|r| Route {
                    polyline: Polyline::new(
                        r.geometry
                            .coordinates
                            .into_iter()
                            .map(|[lng, lat]| Coordinates::new(lat, lng))
                            .collect(),
                    ),
                    distance_meters: r.distance,
                    expected_travel_secs: r.duration,
                })
                .collect()),
            "NoRoute" => Ok(Vec::new()),
            code => Err(Error::Provider(format!(
                "OSRM returned {}: {}",
                code,
                response.message.unwrap_or_default()
            ))),
        }
    }
}

impl RouteBackend for OsrmBackend {
    async fn directions(&self, request: &RouteRequest) -> Result<Vec<Route>> {
        let url = self.route_url(request);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("OSRM request failed: {}", e)))?;

        let status = response.status();

        // OSRM reports NoRoute with a 400 and a JSON body, so parse before judging status
        let body: OsrmResponse = response.json().await.map_err(|e| {
            Error::Provider(format!("Failed to parse OSRM response ({}): {}", status, e))
        })?;

        Self::into_routes(body)
    }
}
