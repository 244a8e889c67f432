//! Map region tracking
//!
//! Decides whether the map has been panned far enough from a reference
//! point to be worth recentring. Small nudges below the threshold are
//! ignored so the map is not re-geocoded on every touch.

use crate::constants::map::RECENTRE_THRESHOLD_METERS;
use crate::coord::Coordinates;
use tracing::debug;

/// Tracks the last position the map was centred on
#[derive(Debug, Clone)]
pub struct RegionTracker {
    threshold_meters: f64,
    reference: Option<Coordinates>,
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new(RECENTRE_THRESHOLD_METERS)
    }
}

impl RegionTracker {
    pub fn new(threshold_meters: f64) -> Self {
        Self {
            threshold_meters,
            reference: None,
        }
    }

    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }

    pub fn reference(&self) -> Option<Coordinates> {
        self.reference
    }

    /// Record the point later movement is measured from
    pub fn set_reference(&mut self, position: Coordinates) {
        self.reference = Some(position);
    }

    /// Report a new map center
    ///
    /// Returns true, and adopts `center` as the new reference, when the
    /// center is strictly farther than the threshold from the reference.
    /// Without a reference nothing happens.
    pub fn on_region_changed(&mut self, center: Coordinates) -> bool {
        let Some(reference) = self.reference else {
            return false;
        };

        let moved = reference.distance_to(center);
        if moved <= self.threshold_meters {
            return false;
        }

        debug!("Map moved {:.1} m from {}, recentring", moved, reference);
        self.reference = Some(center);
        true
    }
}
