//! Route coordination
//!
//! Keeps at most one route on the map. Every call to
//! [`RouteCoordinator::compute_route`] supersedes the ones before it: the
//! overlays are cleared up front and an older request that completes late
//! is dropped instead of drawn.
//!
//! The overlays are cleared before the new route is confirmed, so a failed
//! recompute leaves the map with no route at all.

use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use crate::generation::Generation;
use crate::map::MapSurface;
use crate::route::{Route, RouteBackend, RouteRequest};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info, warn};

/// Result of a route computation that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// These routes are now on the map
    Drawn(Vec<Route>),
    /// A newer request was issued before this one completed
    Superseded,
}

/// Issues directions requests and owns the route overlays
pub struct RouteCoordinator<R> {
    backend: R,
    surface: Arc<dyn MapSurface>,
    destination: Mutex<Option<Coordinates>>,
    requests: Generation,
}

impl<R: RouteBackend> RouteCoordinator<R> {
    pub fn new(backend: R, surface: Arc<dyn MapSurface>) -> Self {
        Self {
            backend,
            surface,
            destination: Mutex::new(None),
            requests: Generation::new(),
        }
    }

    pub fn backend(&self) -> &R {
        &self.backend
    }

    /// Remember where routes should lead
    pub fn set_destination(&self, destination: Coordinates) {
        *self.destination.lock().unwrap_or_else(PoisonError::into_inner) = Some(destination);
    }

    pub fn destination(&self) -> Option<Coordinates> {
        *self.destination.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Compute and draw a driving route from `from` to the stored destination
    ///
    /// # Errors
    /// - `CurrentLocationUnavailable` when `from` is None
    /// - `DestinationUnresolved` when no destination has been set
    /// - `Provider` when the directions provider fails
    /// - `RouteUnavailable` when the provider found no route
    pub async fn compute_route(&self, from: Option<Coordinates>) -> Result<RouteOutcome> {
        let origin = from.ok_or(Error::CurrentLocationUnavailable)?;
        let destination = self.destination().ok_or(Error::DestinationUnresolved)?;

        let request = RouteRequest::automobile(origin, destination);
        let ticket = self.requests.mint();
        self.surface.remove_overlays();

        debug!("Requesting route {} -> {}", origin, destination);
        let result = self.backend.directions(&request).await;

        if !self.requests.is_current(ticket) {
            debug!("Dropping superseded route {} -> {}", origin, destination);
            return Ok(RouteOutcome::Superseded);
        }

        let routes = result.map_err(|e| {
            warn!("Route calculation failed: {}", e);
            match e {
                Error::Provider(_) => e,
                other => Error::Provider(other.to_string()),
            }
        })?;

        if routes.is_empty() {
            return Err(Error::RouteUnavailable);
        }

        self.draw(&routes);
        Ok(RouteOutcome::Drawn(routes))
    }

    /// Invalidate any request still in flight
    pub fn cancel(&self) {
        self.requests.cancel();
    }

    fn draw(&self, routes: &[Route]) {
        let mut visible: Option<BoundingBox> = None;

        for route in routes {
            self.surface.add_overlay(&route.polyline);
            if let Some(bbox) = route.polyline.bounding_box() {
                visible = Some(match visible {
                    Some(v) => v.union(&bbox),
                    None => bbox,
                });
            }
        }

        if let Some(rect) = visible {
            self.surface.set_visible_rect(rect);
        }

        for route in routes {
            info!("{}", route.summary());
        }
    }
}
