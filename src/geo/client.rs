//! Geocoding client used by the map screen
//!
//! Wraps a [`GeoBackend`] with the screen's failure policy: forward lookups
//! that fail are logged and skipped, reverse lookups degrade to an empty
//! address, and a reverse lookup that has been superseded by a newer one
//! never reaches the caller.

use crate::coord::Coordinates;
use crate::error::Error;
use crate::generation::Generation;
use crate::geo::GeoBackend;
use tracing::{debug, warn};

/// Single-shot forward and reverse geocoding with supersession
#[derive(Debug)]
pub struct GeocodingClient<G> {
    backend: G,
    reverse: Generation,
}

impl<G: GeoBackend> GeocodingClient<G> {
    pub fn new(backend: G) -> Self {
        Self {
            backend,
            reverse: Generation::new(),
        }
    }

    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Resolve an address to the coordinate of its first match
    ///
    /// An absent or blank address returns None without contacting the
    /// provider. Provider errors and empty result sets are logged and also
    /// return None.
    pub async fn resolve(&self, address: Option<&str>) -> Option<Coordinates> {
        let address = address.map(str::trim).filter(|a| !a.is_empty())?;

        match self.backend.geocode(address).await {
            Ok(Some(location)) => {
                debug!("Resolved '{}' to {}", address, location.coordinates());
                Some(location.coordinates())
            }
            Ok(None) => {
                warn!("{}", Error::AddressUnresolved(address.to_string()));
                None
            }
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", address, e);
                None
            }
        }
    }

    /// Resolve a coordinate to a short street address
    ///
    /// Issuing a new reverse lookup supersedes any earlier one still in
    /// flight. Returns None when this lookup was superseded or cancelled
    /// before it completed; otherwise the address label, which is empty when
    /// the provider failed or found nothing.
    pub async fn reverse_resolve(&self, coordinate: Coordinates) -> Option<String> {
        let ticket = self.reverse.mint();

        let label = match self.backend.reverse_geocode(coordinate.lat, coordinate.lng).await {
            Ok(Some(location)) => location.address_label(),
            Ok(None) => String::new(),
            Err(e) => {
                warn!("Reverse geocoding {} failed: {}", coordinate, e);
                String::new()
            }
        };

        if !self.reverse.is_current(ticket) {
            debug!("Discarding superseded reverse geocode for {}", coordinate);
            return None;
        }
        Some(label)
    }

    /// Cancel the reverse lookup in flight, if any
    pub fn cancel_reverse(&self) {
        self.reverse.cancel();
    }
}
