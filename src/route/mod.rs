//! Driving directions
//!
//! This module defines the `RouteBackend` trait, the OSRM implementation
//! and the [`RouteCoordinator`] that keeps at most one route on the map.

pub mod coordinator;
pub mod osrm;

pub use coordinator::{RouteCoordinator, RouteOutcome};

use crate::coord::{Coordinates, Polyline};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Means of travel for a route request
///
/// Only driving is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Automobile,
}

/// One directions computation between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
    pub transport: TransportMode,
    /// Whether the provider may return alternate routes
    pub alternates: bool,
}

impl RouteRequest {
    /// Single-leg driving request with no alternates
    pub fn automobile(origin: Coordinates, destination: Coordinates) -> Self {
        Self {
            origin,
            destination,
            transport: TransportMode::Automobile,
            alternates: false,
        }
    }
}

/// A computed route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub polyline: Polyline,
    pub distance_meters: f64,
    pub expected_travel_secs: f64,
}

impl Route {
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            distance_km: self.distance_meters / 1000.0,
            eta_minutes: self.expected_travel_secs / 60.0,
        }
    }
}

/// Human-readable distance and travel time of a route
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub eta_minutes: f64,
}

impl std::fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Distance: {:.1} km, time: {:.1} min", self.distance_km, self.eta_minutes)
    }
}

/// Trait for directions providers
pub trait RouteBackend: Send + Sync {
    /// Compute routes for a request
    ///
    /// An empty vector means the provider found no route.
    fn directions(
        &self,
        request: &RouteRequest,
    ) -> impl std::future::Future<Output = Result<Vec<Route>>> + Send;
}

/// Get the default routing backend
pub fn get_router(base_url: &str) -> Result<osrm::OsrmBackend> {
    osrm::OsrmBackend::with_base_url(base_url)
}
