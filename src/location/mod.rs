//! Device location and permission handling
//!
//! The platform's location service is reached through [`LocationProvider`].
//! Permission changes arrive as [`AuthorizationState`] messages on a
//! channel and are forwarded to a [`LocationEventsSink`]; nothing in this
//! module changes the permission state on its own.

pub mod alert;
pub mod gate;

pub use alert::{Alert, AlertPresenter, AlertSink, SurfaceReady};
pub use gate::{AuthorizationGate, GateOutcome};

use crate::coord::Coordinates;
use serde::{Deserialize, Serialize};

/// Permission status for using device location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    /// The user has not been asked yet
    NotDetermined,
    /// Location use is blocked by policy (parental controls, MDM)
    Restricted,
    /// The user said no
    Denied,
    /// Allowed while the app is in the foreground
    AuthorizedWhenInUse,
    /// Allowed at all times
    AuthorizedAlways,
}

impl AuthorizationState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::AuthorizedWhenInUse | Self::AuthorizedAlways)
    }
}

impl std::fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "not_determined"),
            Self::Restricted => write!(f, "restricted"),
            Self::Denied => write!(f, "denied"),
            Self::AuthorizedWhenInUse => write!(f, "authorized_when_in_use"),
            Self::AuthorizedAlways => write!(f, "authorized_always"),
        }
    }
}

impl std::str::FromStr for AuthorizationState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_determined" | "not-determined" => Ok(Self::NotDetermined),
            "restricted" => Ok(Self::Restricted),
            "denied" => Ok(Self::Denied),
            "authorized_when_in_use" | "when-in-use" | "when_in_use" => {
                Ok(Self::AuthorizedWhenInUse)
            }
            "authorized_always" | "always" => Ok(Self::AuthorizedAlways),
            _ => Err(format!("Unknown authorization state: {}", s)),
        }
    }
}

/// Platform location service
pub trait LocationProvider: Send + Sync {
    /// Whether location services are switched on system-wide
    fn services_enabled(&self) -> bool;

    /// Current permission status for this app
    fn authorization_state(&self) -> AuthorizationState;

    /// Ask the user for when-in-use permission
    ///
    /// The answer arrives later as a state-change notification.
    fn request_authorization(&self);

    /// Last known device position
    fn current_position(&self) -> Option<Coordinates>;

    /// Begin continuous position updates
    fn start_updating(&self) {}
}

/// Receiver of permission-change notifications
pub trait LocationEventsSink: Send + Sync {
    fn authorization_changed(&self, state: AuthorizationState);
}

/// Provider with a fixed position and permission state
///
/// Used where positions come from the command line or an IP lookup.
#[derive(Debug, Clone)]
pub struct StaticLocation {
    position: Option<Coordinates>,
    state: AuthorizationState,
}

impl StaticLocation {
    /// Authorized provider at the given position
    pub fn at(position: Coordinates) -> Self {
        Self {
            position: Some(position),
            state: AuthorizationState::AuthorizedWhenInUse,
        }
    }

    /// Authorized provider that has no position fix
    pub fn unknown() -> Self {
        Self {
            position: None,
            state: AuthorizationState::AuthorizedWhenInUse,
        }
    }
}

impl LocationProvider for StaticLocation {
    fn services_enabled(&self) -> bool {
        true
    }

    fn authorization_state(&self) -> AuthorizationState {
        self.state
    }

    fn request_authorization(&self) {}

    fn current_position(&self) -> Option<Coordinates> {
        self.position
    }
}
