//! Error types for my-places

use thiserror::Error;

/// Main error type for my-places operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Location services are disabled")]
    ServiceDisabled,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location permission restricted")]
    PermissionRestricted,

    #[error("Address could not be resolved: {0}")]
    AddressUnresolved(String),

    #[error("Destination is not found")]
    DestinationUnresolved,

    #[error("Current location is not found")]
    CurrentLocationUnavailable,

    #[error("Direction is not available")]
    RouteUnavailable,

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid place: {0}")]
    InvalidPlace(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether this failure is shown to the user as an alert.
    ///
    /// Permission-denied and disabled services carry remediation text; route
    /// preconditions use a generic message. Everything else is logged and
    /// absorbed by the caller.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::ServiceDisabled
                | Error::PermissionDenied
                | Error::DestinationUnresolved
                | Error::CurrentLocationUnavailable
                | Error::RouteUnavailable
        )
    }
}

/// Result type alias for my-places operations
pub type Result<T> = std::result::Result<T, Error>;
