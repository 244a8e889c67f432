//! Map presentation seam
//!
//! The map screen itself is outside this crate. Everything the location and
//! route logic wants drawn goes through [`MapSurface`].

use crate::coord::{BoundingBox, Coordinates, Polyline, Region};
use crate::places::Place;
use serde::{Deserialize, Serialize};

/// A labelled point marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub coordinate: Coordinates,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Photo shown in the marker callout
    #[serde(skip)]
    pub thumbnail: Option<Vec<u8>>,
}

impl Annotation {
    /// Marker for a place at its resolved coordinate
    pub fn for_place(place: &Place, coordinate: Coordinates) -> Self {
        Self {
            coordinate,
            title: place.name.clone(),
            subtitle: place.place_type.clone(),
            thumbnail: place.image_data.clone(),
        }
    }
}

/// Map view operations used by the coordinators
///
/// Implementations are called from async tasks and must handle their own
/// synchronisation.
pub trait MapSurface: Send + Sync {
    /// Show the annotations and zoom so they are all visible
    fn show_annotations(&self, annotations: &[Annotation]);

    /// Open the callout of an annotation
    fn select_annotation(&self, annotation: &Annotation);

    /// Draw a route line
    fn add_overlay(&self, polyline: &Polyline);

    /// Remove every route line
    fn remove_overlays(&self);

    /// Zoom to a rectangle
    fn set_visible_rect(&self, rect: BoundingBox);

    /// Centre on a region
    fn set_region(&self, region: Region);

    /// Toggle the user-position dot
    fn set_shows_user_location(&self, shows: bool);

    /// Update the address shown under the centre pin
    fn set_address_label(&self, label: &str);
}
