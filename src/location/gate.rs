//! Location permission gate
//!
//! Decides whether location features may be switched on, given whether
//! location services are enabled and the current [`AuthorizationState`].
//!
//! | services | state                  | effect                                  |
//! |----------|------------------------|-----------------------------------------|
//! | off      | any                    | disabled-services alert                 |
//! | on       | not determined         | permission requested, nothing else      |
//! | on       | denied                 | disabled-services alert                 |
//! | on       | restricted             | nothing                                 |
//! | on       | authorized (either)    | `on_granted` runs synchronously         |

use crate::error::Error;
use crate::location::alert::{Alert, AlertPresenter};
use crate::location::{AuthorizationState, LocationEventsSink, LocationProvider};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// What a gate check did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Permission held; the granted callback ran
    Granted,
    /// Permission was requested; wait for a change notification
    Requested,
    /// Location services are off system-wide; an alert was scheduled
    ServicesDisabled,
    /// The user denied permission; an alert was scheduled
    Denied,
    /// Location use is restricted; feature stays off silently
    Restricted,
}

/// Gate in front of every location-dependent feature
#[derive(Clone)]
pub struct AuthorizationGate {
    provider: Arc<dyn LocationProvider>,
    alerts: AlertPresenter,
}

impl AuthorizationGate {
    pub fn new(provider: Arc<dyn LocationProvider>, alerts: AlertPresenter) -> Self {
        Self { provider, alerts }
    }

    /// Check permission and run `on_granted` if location may be used
    ///
    /// Alerts are scheduled, not shown inline, so this never blocks.
    pub fn check_and_proceed(&self, on_granted: impl FnOnce()) -> GateOutcome {
        if !self.provider.services_enabled() {
            debug!("{}", Error::ServiceDisabled);
            self.alerts.schedule(Alert::error(&Error::ServiceDisabled));
            return GateOutcome::ServicesDisabled;
        }

        match self.provider.authorization_state() {
            AuthorizationState::NotDetermined => {
                debug!("Requesting location authorization");
                self.provider.request_authorization();
                GateOutcome::Requested
            }
            AuthorizationState::Denied => {
                debug!("{}", Error::PermissionDenied);
                self.alerts.schedule(Alert::error(&Error::PermissionDenied));
                GateOutcome::Denied
            }
            AuthorizationState::Restricted => {
                debug!("{}", Error::PermissionRestricted);
                GateOutcome::Restricted
            }
            AuthorizationState::AuthorizedWhenInUse | AuthorizationState::AuthorizedAlways => {
                on_granted();
                GateOutcome::Granted
            }
        }
    }

    /// Forward permission-change notifications to `sink` until the channel closes
    pub async fn listen(
        mut events: mpsc::Receiver<AuthorizationState>,
        sink: Arc<dyn LocationEventsSink>,
    ) {
        while let Some(state) = events.recv().await {
            info!("Location authorization changed: {}", state);
            sink.authorization_changed(state);
        }
        debug!("Authorization channel closed");
    }
}
