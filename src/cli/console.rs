//! Terminal stand-ins for the map screen
//!
//! The CLI has no map to draw on, so map events are logged and alerts are
//! printed to stderr.

use crate::coord::{BoundingBox, Polyline, Region};
use crate::location::{Alert, AlertSink};
use crate::map::{Annotation, MapSurface};
use tracing::{debug, info};

/// Map surface that logs what would be drawn
#[derive(Debug, Default)]
pub struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn show_annotations(&self, annotations: &[Annotation]) {
        for annotation in annotations {
            info!("Marker {} at {}", annotation.title, annotation.coordinate);
        }
    }

    fn select_annotation(&self, annotation: &Annotation) {
        debug!("Selected marker {}", annotation.title);
    }

    fn add_overlay(&self, polyline: &Polyline) {
        debug!("Route overlay with {} points", polyline.points.len());
    }

    fn remove_overlays(&self) {
        debug!("Cleared route overlays");
    }

    fn set_visible_rect(&self, rect: BoundingBox) {
        debug!("Zoomed to {} .. {}", rect.min, rect.max);
    }

    fn set_region(&self, region: Region) {
        debug!("Centred on {} ({} m)", region.center, region.span_meters);
    }

    fn set_shows_user_location(&self, shows: bool) {
        debug!("User location dot {}", if shows { "on" } else { "off" });
    }

    fn set_address_label(&self, label: &str) {
        debug!("Address label: {:?}", label);
    }
}

/// Alert sink printing to stderr
#[derive(Debug, Default)]
pub struct ConsoleAlerts;

impl AlertSink for ConsoleAlerts {
    fn present(&self, alert: Alert) {
        eprintln!("{}", render(&alert));
    }
}

fn render(alert: &Alert) -> String {
    format!("{}: {}", alert.title, alert.message)
}
