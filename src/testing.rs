//! In-memory stand-ins for the platform and provider seams, for tests

use crate::coord::{BoundingBox, Coordinates, Polyline, Region};
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, GeoLocation};
use crate::location::{Alert, AlertSink, AuthorizationState, LocationProvider};
use crate::map::{Annotation, MapSurface};
use crate::route::{Route, RouteBackend, RouteRequest};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

/// Geocoder answering from a fixed table
#[derive(Default)]
pub struct FakeGeocoder {
    addresses: Mutex<HashMap<String, GeoLocation>>,
    reverse: Mutex<Option<GeoLocation>>,
    failure: Mutex<Option<String>>,
    reverse_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    forward_calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn add_address(&self, address: &str, location: GeoLocation) {
        self.addresses.lock().unwrap().insert(address.to_string(), location);
    }

    pub fn set_reverse(&self, location: GeoLocation) {
        *self.reverse.lock().unwrap() = Some(location);
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Hold the next reverse lookup until the returned sender fires
    pub fn hold_next_reverse(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.reverse_gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn forward_calls(&self) -> usize {
        self.forward_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<Error> {
        self.failure.lock().unwrap().clone().map(Error::Provider)
    }
}

impl GeoBackend for FakeGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<GeoLocation>> {
        self.forward_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.addresses.lock().unwrap().get(query).cloned())
    }

    async fn reverse_geocode(&self, _lat: f64, _lng: f64) -> Result<Option<GeoLocation>> {
        let gate = self.reverse_gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.reverse.lock().unwrap().clone())
    }
}

/// Router returning a straight line from origin to destination
#[derive(Default)]
pub struct FakeRouter {
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    failure: Mutex<Option<String>>,
    empty: AtomicBool,
    calls: AtomicUsize,
    last_request: Mutex<Option<RouteRequest>>,
}

impl FakeRouter {
    /// Hold the next directions call until the returned sender fires
    pub fn hold_next(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn return_nothing(&self) {
        self.empty.store(true, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<RouteRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl RouteBackend for FakeRouter {
    async fn directions(&self, request: &RouteRequest) -> Result<Vec<Route>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let gate = self.gates.lock().unwrap().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(Error::Provider(message));
        }
        if self.empty.load(Ordering::SeqCst) {
            return Ok(Vec::new());
        }

        let polyline = Polyline::new(vec![request.origin, request.destination]);
        Ok(vec![Route {
            distance_meters: polyline.length_meters() * 1.3,
            expected_travel_secs: polyline.length_meters() / 8.0,
            polyline,
        }])
    }
}

/// Map surface that records what was drawn
#[derive(Default)]
pub struct RecordingMap {
    annotations: Mutex<Vec<Annotation>>,
    selected: Mutex<Option<Annotation>>,
    overlays: Mutex<Vec<Polyline>>,
    visible_rect: Mutex<Option<BoundingBox>>,
    regions: Mutex<Vec<Region>>,
    shows_user_location: AtomicBool,
    address_labels: Mutex<Vec<String>>,
}

impl RecordingMap {
    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.lock().unwrap().clone()
    }

    pub fn selected(&self) -> Option<Annotation> {
        self.selected.lock().unwrap().clone()
    }

    pub fn overlays(&self) -> Vec<Polyline> {
        self.overlays.lock().unwrap().clone()
    }

    pub fn visible_rect(&self) -> Option<BoundingBox> {
        *self.visible_rect.lock().unwrap()
    }

    pub fn regions(&self) -> Vec<Region> {
        self.regions.lock().unwrap().clone()
    }

    pub fn shows_user_location(&self) -> bool {
        self.shows_user_location.load(Ordering::SeqCst)
    }

    pub fn address_labels(&self) -> Vec<String> {
        self.address_labels.lock().unwrap().clone()
    }
}

impl MapSurface for RecordingMap {
    fn show_annotations(&self, annotations: &[Annotation]) {
        self.annotations.lock().unwrap().extend_from_slice(annotations);
    }

    fn select_annotation(&self, annotation: &Annotation) {
        *self.selected.lock().unwrap() = Some(annotation.clone());
    }

    fn add_overlay(&self, polyline: &Polyline) {
        self.overlays.lock().unwrap().push(polyline.clone());
    }

    fn remove_overlays(&self) {
        self.overlays.lock().unwrap().clear();
    }

    fn set_visible_rect(&self, rect: BoundingBox) {
        *self.visible_rect.lock().unwrap() = Some(rect);
    }

    fn set_region(&self, region: Region) {
        self.regions.lock().unwrap().push(region);
    }

    fn set_shows_user_location(&self, shows: bool) {
        self.shows_user_location.store(shows, Ordering::SeqCst);
    }

    fn set_address_label(&self, label: &str) {
        self.address_labels.lock().unwrap().push(label.to_string());
    }
}

/// Alert sink that records presented alerts
#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn present(&self, alert: Alert) {
        self.alerts.lock().unwrap().push(alert);
    }
}

/// Location service with settable state
pub struct FakeLocation {
    enabled: AtomicBool,
    state: Mutex<AuthorizationState>,
    position: Mutex<Option<Coordinates>>,
    requests: AtomicUsize,
    updating: AtomicBool,
}

impl FakeLocation {
    pub fn new(state: AuthorizationState) -> Self {
        Self {
            enabled: AtomicBool::new(true),
            state: Mutex::new(state),
            position: Mutex::new(None),
            requests: AtomicUsize::new(0),
            updating: AtomicBool::new(false),
        }
    }

    pub fn set_services_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_state(&self, state: AuthorizationState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn set_position(&self, position: Coordinates) {
        *self.position.lock().unwrap() = Some(position);
    }

    pub fn authorization_requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::SeqCst)
    }
}

impl LocationProvider for FakeLocation {
    fn services_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    fn authorization_state(&self) -> AuthorizationState {
        *self.state.lock().unwrap()
    }

    fn request_authorization(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn current_position(&self) -> Option<Coordinates> {
        *self.position.lock().unwrap()
    }

    fn start_updating(&self) {
        self.updating.store(true, Ordering::SeqCst);
    }
}
