//! Coordinates and map geometry
//!
//! This module handles:
//! - Latitude/longitude pairs and their validation
//! - Great-circle distance
//! - Visible map regions and bounding boxes
//! - Route polylines

pub mod distance;

use crate::constants::geo::METERS_PER_DEGREE_LAT;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Coordinates ({}, {}) are not finite",
                self.lat, self.lng
            )));
        }
        if self.lat < -90.0 || self.lat > 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if self.lng < -180.0 || self.lng > 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Distance to another coordinate in meters
    pub fn distance_to(&self, other: Coordinates) -> f64 {
        distance::haversine_distance(*self, other)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// A visible map region: a square of `span_meters` centred on a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub center: Coordinates,
    pub span_meters: f64,
}

impl Region {
    /// Region of the given side length around a center
    pub fn around(center: Coordinates, span_meters: f64) -> Self {
        Self {
            center,
            span_meters,
        }
    }

    /// Bounding box covered by this region
    pub fn bounding_box(&self) -> BoundingBox {
        let half = self.span_meters / 2.0;
        let meters_per_deg_lng = METERS_PER_DEGREE_LAT * (self.center.lat * PI / 180.0).cos();

        let delta_lat = half / METERS_PER_DEGREE_LAT;
        let delta_lng = if meters_per_deg_lng > 0.0 {
            half / meters_per_deg_lng
        } else {
            180.0
        };

        BoundingBox {
            min: Coordinates::new(self.center.lat - delta_lat, self.center.lng - delta_lng),
            max: Coordinates::new(self.center.lat + delta_lat, self.center.lng + delta_lng),
        }
    }
}

/// Axis-aligned latitude/longitude box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Coordinates,
    pub max: Coordinates,
}

impl BoundingBox {
    /// Smallest box containing every point, or None for an empty slice
    pub fn of(points: &[Coordinates]) -> Option<Self> {
        let first = *points.first()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            bbox.min.lat = bbox.min.lat.min(p.lat);
            bbox.min.lng = bbox.min.lng.min(p.lng);
            bbox.max.lat = bbox.max.lat.max(p.lat);
            bbox.max.lng = bbox.max.lng.max(p.lng);
        }
        Some(bbox)
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Coordinates::new(self.min.lat.min(other.min.lat), self.min.lng.min(other.min.lng)),
            max: Coordinates::new(self.max.lat.max(other.max.lat), self.max.lng.max(other.max.lng)),
        }
    }

    /// Midpoint of the box
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.min.lat + self.max.lat) / 2.0,
            (self.min.lng + self.max.lng) / 2.0,
        )
    }

    pub fn contains(&self, point: Coordinates) -> bool {
        point.lat >= self.min.lat
            && point.lat <= self.max.lat
            && point.lng >= self.min.lng
            && point.lng <= self.max.lng
    }
}

/// An ordered line of coordinates drawn as a map overlay
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Coordinates>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinates>) -> Self {
        Self { points }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::of(&self.points)
    }

    /// Sum of segment lengths in meters
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| distance::haversine_distance(w[0], w[1]))
            .sum()
    }
}
