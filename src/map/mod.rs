//! Map screen coordination
//!
//! [`MapManager`] ties the pieces together for one map screen:
//! - the permission gate decides whether the user's position is shown
//! - the geocoding client turns a place's address into an annotation and
//!   the map center into a street address
//! - the route coordinator draws directions to the place
//! - the region tracker snaps the map back to the user after panning

pub mod surface;

pub use surface::{Annotation, MapSurface};

use crate::config::MapConfig;
use crate::coord::{Coordinates, Region};
use crate::error::Result;
use crate::geo::{GeoBackend, GeocodingClient};
use crate::location::{
    Alert, AlertPresenter, AuthorizationGate, AuthorizationState, GateOutcome, LocationEventsSink,
    LocationProvider,
};
use crate::places::Place;
use crate::region::RegionTracker;
use crate::route::{RouteBackend, RouteCoordinator, RouteOutcome};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::debug;

/// What the map screen was opened for
#[derive(Debug, Clone)]
pub enum MapMode {
    /// Show a saved place and offer directions to it
    ShowPlace(Place),
    /// Let the user pick an address by panning under a fixed pin
    PickAddress,
}

/// Tunables for one map screen
#[derive(Debug, Clone, Copy)]
pub struct MapSettings {
    /// Side of the region shown around the user
    pub region_meters: f64,
    /// Panning distance that counts as moving away
    pub recentre_threshold_meters: f64,
    /// Wait before snapping back to the user
    pub recentre_delay: Duration,
}

impl From<&MapConfig> for MapSettings {
    fn from(config: &MapConfig) -> Self {
        Self {
            region_meters: config.region_meters,
            recentre_threshold_meters: config.recentre_threshold_meters,
            recentre_delay: Duration::from_secs(config.recentre_delay_secs),
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

/// Location, geocoding and routing behind one map screen
pub struct MapManager<G, R> {
    mode: MapMode,
    settings: MapSettings,
    surface: Arc<dyn MapSurface>,
    location: Arc<dyn LocationProvider>,
    alerts: AlertPresenter,
    gate: AuthorizationGate,
    geocoder: GeocodingClient<G>,
    routes: RouteCoordinator<R>,
    tracker: Mutex<RegionTracker>,
    address: Mutex<String>,
}

impl<G: GeoBackend, R: RouteBackend> MapManager<G, R> {
    pub fn new(
        mode: MapMode,
        settings: MapSettings,
        surface: Arc<dyn MapSurface>,
        location: Arc<dyn LocationProvider>,
        alerts: AlertPresenter,
        geocoder: G,
        router: R,
    ) -> Self {
        Self {
            mode,
            settings,
            gate: AuthorizationGate::new(Arc::clone(&location), alerts.clone()),
            geocoder: GeocodingClient::new(geocoder),
            routes: RouteCoordinator::new(router, Arc::clone(&surface)),
            tracker: Mutex::new(RegionTracker::new(settings.recentre_threshold_meters)),
            address: Mutex::new(String::new()),
            surface,
            location,
            alerts,
        }
    }

    pub fn mode(&self) -> &MapMode {
        &self.mode
    }

    /// Prepare the screen
    ///
    /// Runs the permission gate and, for a saved place, drops its marker.
    pub async fn setup(&self) -> GateOutcome {
        let outcome = self.check_location_services();

        if let MapMode::ShowPlace(place) = &self.mode {
            self.setup_placemark(place).await;
        }

        outcome
    }

    /// Run the permission gate; on grant show the user's position
    pub fn check_location_services(&self) -> GateOutcome {
        self.gate.check_and_proceed(|| {
            self.surface.set_shows_user_location(true);
            if matches!(self.mode, MapMode::PickAddress) {
                self.show_user_location();
            }
        })
    }

    /// Geocode the place and show it as a selected annotation
    ///
    /// The resolved coordinate becomes the route destination. A place
    /// without an address, or one that cannot be geocoded, gets no marker.
    pub async fn setup_placemark(&self, place: &Place) -> Option<Annotation> {
        let coordinate = self.geocoder.resolve(place.location.as_deref()).await?;
        let annotation = Annotation::for_place(place, coordinate);

        self.routes.set_destination(coordinate);
        self.surface.show_annotations(std::slice::from_ref(&annotation));
        self.surface.select_annotation(&annotation);

        Some(annotation)
    }

    /// Centre the map on the user, if a position is known
    pub fn show_user_location(&self) {
        show_user_location(
            self.surface.as_ref(),
            self.location.as_ref(),
            self.settings.region_meters,
        );
    }

    /// Draw driving directions from the user to the place
    ///
    /// Missing position, missing destination and "no route" are shown as
    /// alerts; provider failures are only logged. The error is returned
    /// either way.
    pub async fn get_directions(&self) -> Result<RouteOutcome> {
        let current = self.location.current_position();

        if let Some(position) = current {
            self.location.start_updating();
            self.lock_tracker().set_reference(position);
        }

        let result = self.routes.compute_route(current).await;
        if let Err(e) = &result {
            if e.is_user_facing() {
                self.alerts.schedule(Alert::error(e));
            } else {
                debug!("Directions failed without alert: {}", e);
            }
        }
        result
    }

    /// React to the visible region moving
    ///
    /// When picking an address, the center is reverse geocoded and the
    /// label updated unless a newer lookup has started since. Panning far
    /// from the tracked position schedules a recentre on the user.
    pub async fn region_did_change(&self, center: Coordinates) {
        if self.lock_tracker().on_region_changed(center) {
            self.schedule_recentre();
        }

        if matches!(self.mode, MapMode::PickAddress) {
            if let Some(label) = self.geocoder.reverse_resolve(center).await {
                self.surface.set_address_label(&label);
                *self.address.lock().unwrap_or_else(PoisonError::into_inner) = label;
            }
        }
    }

    /// Address currently under the pin
    pub fn picked_address(&self) -> String {
        self.address.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Destination resolved for routing, if any
    pub fn destination(&self) -> Option<Coordinates> {
        self.routes.destination()
    }

    /// Wait for scheduled alerts to be delivered
    pub async fn flush_alerts(&self) {
        self.alerts.flush().await;
    }

    fn schedule_recentre(&self) {
        let surface = Arc::clone(&self.surface);
        let location = Arc::clone(&self.location);
        let delay = self.settings.recentre_delay;
        let meters = self.settings.region_meters;

        debug!("Recentring on user in {:?}", delay);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            show_user_location(surface.as_ref(), location.as_ref(), meters);
        });
    }

    fn lock_tracker(&self) -> std::sync::MutexGuard<'_, RegionTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: GeoBackend, R: RouteBackend> LocationEventsSink for MapManager<G, R> {
    fn authorization_changed(&self, state: AuthorizationState) {
        debug!("Re-checking location services after change to {}", state);
        self.check_location_services();
    }
}

fn show_user_location(surface: &dyn MapSurface, location: &dyn LocationProvider, meters: f64) {
    if let Some(position) = location.current_position() {
        surface.set_region(Region::around(position, meters));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::geo::GeoLocation;
    use crate::location::SurfaceReady;
    use crate::testing::{FakeGeocoder, FakeLocation, FakeRouter, RecordingAlerts, RecordingMap};

    const HOME: Coordinates = Coordinates { lat: 37.4275, lng: -122.1697 };

    struct Screen {
        manager: MapManager<FakeGeocoder, FakeRouter>,
        map: Arc<RecordingMap>,
        location: Arc<FakeLocation>,
        alerts: Arc<RecordingAlerts>,
        _ready: SurfaceReady,
    }

    fn googleplex() -> GeoLocation {
        GeoLocation {
            lat: 37.4224857,
            lng: -122.0855846,
            display_name: "Google Building 41, 1600 Amphitheatre Parkway".to_string(),
            street: Some("Amphitheatre Parkway".to_string()),
            house_number: Some("1600".to_string()),
        }
    }

    fn googleplex_place() -> Place {
        Place::new("Googleplex")
            .unwrap()
            .with_location("1600 Amphitheatre Parkway")
            .with_type("Office")
    }

    fn screen(mode: MapMode, state: AuthorizationState) -> Screen {
        let map = Arc::new(RecordingMap::default());
        let location = Arc::new(FakeLocation::new(state));
        location.set_position(HOME);
        let alerts = Arc::new(RecordingAlerts::default());
        let (ready, rx) = SurfaceReady::channel();
        ready.mark_ready();

        let geocoder = FakeGeocoder::default();
        geocoder.add_address("1600 Amphitheatre Parkway", googleplex());
        geocoder.set_reverse(googleplex());

        let settings = MapSettings {
            recentre_delay: Duration::from_millis(10),
            ..MapSettings::default()
        };

        let manager = MapManager::new(
            mode,
            settings,
            map.clone(),
            location.clone(),
            AlertPresenter::new(alerts.clone(), rx),
            geocoder,
            FakeRouter::default(),
        );

        Screen {
            manager,
            map,
            location,
            alerts,
            _ready: ready,
        }
    }

    #[tokio::test]
    async fn test_show_place_drops_annotation() {
        let s = screen(
            MapMode::ShowPlace(googleplex_place()),
            AuthorizationState::AuthorizedWhenInUse,
        );

        assert_eq!(s.manager.setup().await, GateOutcome::Granted);

        let annotations = s.map.annotations();
        assert_eq!(annotations.len(), 1);
        let annotation = &annotations[0];
        assert_eq!(annotation.title, "Googleplex");
        assert_eq!(annotation.subtitle.as_deref(), Some("Office"));
        assert!((annotation.coordinate.lat - 37.422).abs() < 0.01);
        assert!((annotation.coordinate.lng - (-122.084)).abs() < 0.01);

        assert_eq!(s.map.selected().as_ref(), Some(annotation));
        assert_eq!(s.manager.destination(), Some(annotation.coordinate));
        assert!(s.map.shows_user_location());
        // Only the address picker centres on the user during setup
        assert!(s.map.regions().is_empty());
    }

    #[tokio::test]
    async fn test_place_without_location_has_no_annotation() {
        let place = Place::new("Somewhere").unwrap();
        let s = screen(MapMode::ShowPlace(place), AuthorizationState::AuthorizedWhenInUse);

        s.manager.setup().await;
        s.manager.flush_alerts().await;

        assert!(s.map.annotations().is_empty());
        assert!(s.alerts.alerts().is_empty());
        assert!(s.manager.destination().is_none());
    }

    #[tokio::test]
    async fn test_thumbnail_carried_on_annotation() {
        let place = googleplex_place().with_image(vec![1, 2, 3]);
        let s = screen(MapMode::ShowPlace(place.clone()), AuthorizationState::AuthorizedAlways);

        let annotation = s.manager.setup_placemark(&place).await.unwrap();
        assert_eq!(annotation.thumbnail, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_pick_address_centres_on_user() {
        let s = screen(MapMode::PickAddress, AuthorizationState::AuthorizedWhenInUse);
        s.manager.setup().await;

        let regions = s.map.regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].center, HOME);
        assert_eq!(regions[0].span_meters, 1000.0);
    }

    #[tokio::test]
    async fn test_not_determined_requests_permission() {
        let s = screen(MapMode::PickAddress, AuthorizationState::NotDetermined);

        assert_eq!(s.manager.setup().await, GateOutcome::Requested);
        s.manager.flush_alerts().await;

        assert_eq!(s.location.authorization_requests(), 1);
        assert!(s.alerts.alerts().is_empty());
        assert!(!s.map.shows_user_location());
    }

    #[tokio::test]
    async fn test_authorization_change_rechecks() {
        let s = screen(MapMode::PickAddress, AuthorizationState::NotDetermined);
        s.manager.setup().await;
        assert!(!s.map.shows_user_location());

        s.location.set_state(AuthorizationState::AuthorizedWhenInUse);
        s.manager.authorization_changed(AuthorizationState::AuthorizedWhenInUse);
        assert!(s.map.shows_user_location());
    }

    #[tokio::test]
    async fn test_directions_draw_route() {
        let s = screen(
            MapMode::ShowPlace(googleplex_place()),
            AuthorizationState::AuthorizedWhenInUse,
        );
        s.manager.setup().await;

        let outcome = s.manager.get_directions().await.unwrap();
        assert!(matches!(outcome, RouteOutcome::Drawn(ref routes) if routes.len() == 1));
        assert_eq!(s.map.overlays().len(), 1);
        assert!(s.location.is_updating());
    }

    #[tokio::test]
    async fn test_directions_without_destination_alerts() {
        let s = screen(
            MapMode::ShowPlace(Place::new("No address").unwrap()),
            AuthorizationState::AuthorizedWhenInUse,
        );
        s.manager.setup().await;

        let err = s.manager.get_directions().await.unwrap_err();
        s.manager.flush_alerts().await;

        assert!(matches!(err, Error::DestinationUnresolved));
        assert_eq!(s.alerts.alerts(), vec![Alert::new("Error", "Destination is not found")]);
    }

    #[tokio::test]
    async fn test_directions_provider_failure_is_silent() {
        let s = screen(
            MapMode::ShowPlace(googleplex_place()),
            AuthorizationState::AuthorizedWhenInUse,
        );
        s.manager.setup().await;
        s.manager.routes.backend().fail_with("boom");

        assert!(s.manager.get_directions().await.is_err());
        s.manager.flush_alerts().await;
        assert!(s.alerts.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_pick_address_updates_label() {
        let s = screen(MapMode::PickAddress, AuthorizationState::AuthorizedWhenInUse);
        s.manager.setup().await;

        s.manager.region_did_change(Coordinates::new(37.422, -122.084)).await;

        assert_eq!(s.map.address_labels(), vec!["Amphitheatre Parkway, 1600".to_string()]);
        assert_eq!(s.manager.picked_address(), "Amphitheatre Parkway, 1600");
    }

    #[tokio::test]
    async fn test_show_place_does_not_reverse_geocode() {
        let s = screen(
            MapMode::ShowPlace(googleplex_place()),
            AuthorizationState::AuthorizedWhenInUse,
        );
        s.manager.region_did_change(Coordinates::new(37.422, -122.084)).await;
        assert!(s.map.address_labels().is_empty());
    }

    #[tokio::test]
    async fn test_panning_after_directions_recentres() {
        let s = screen(
            MapMode::ShowPlace(googleplex_place()),
            AuthorizationState::AuthorizedWhenInUse,
        );
        s.manager.setup().await;
        s.manager.get_directions().await.unwrap();

        // Small nudge: nothing scheduled
        s.manager.region_did_change(Coordinates::new(HOME.lat + 0.0001, HOME.lng)).await;
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(s.map.regions().is_empty());

        // ~1 km pan
        s.manager.region_did_change(Coordinates::new(HOME.lat + 0.01, HOME.lng)).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let regions = s.map.regions();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].center, HOME);
    }
}
