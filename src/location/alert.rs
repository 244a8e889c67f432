//! User-facing alerts
//!
//! Alerts are held back until the presenting surface reports that it is
//! ready, so an alert raised during screen setup is not lost in the middle
//! of a view transition. A single task presents them in the order they
//! were scheduled.

use crate::constants::alerts::{ERROR_TITLE, SERVICES_DISABLED_MESSAGE, SERVICES_DISABLED_TITLE};
use crate::error::Error;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, warn};

/// A blocking informational message with a single OK action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Remediation alert for disabled services or denied permission
    pub fn services_disabled() -> Self {
        Self::new(SERVICES_DISABLED_TITLE, SERVICES_DISABLED_MESSAGE)
    }

    /// Generic error alert carrying the error's message
    pub fn error(err: &Error) -> Self {
        match err {
            Error::ServiceDisabled | Error::PermissionDenied => Self::services_disabled(),
            other => Self::new(ERROR_TITLE, other.to_string()),
        }
    }
}

/// Something that can show an alert to the user
pub trait AlertSink: Send + Sync {
    fn present(&self, alert: Alert);
}

/// Sender half of the "surface is ready" signal
#[derive(Debug)]
pub struct SurfaceReady {
    tx: watch::Sender<bool>,
}

impl SurfaceReady {
    /// New signal in the not-ready state
    pub fn channel() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { tx }, rx)
    }

    /// Report that the surface has finished presenting
    pub fn mark_ready(&self) {
        self.tx.send_replace(true);
    }

    /// Report that the surface is transitioning again
    pub fn mark_busy(&self) {
        self.tx.send_replace(false);
    }
}

enum Command {
    Present(Alert),
    Flush(oneshot::Sender<()>),
}

/// Delivers alerts to a sink once the surface is ready
#[derive(Clone)]
pub struct AlertPresenter {
    queue: mpsc::UnboundedSender<Command>,
}

impl AlertPresenter {
    /// Start the presenting task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(sink: Arc<dyn AlertSink>, ready: watch::Receiver<bool>) -> Self {
        let (queue, commands) = mpsc::unbounded_channel();
        tokio::spawn(present_in_order(sink, ready, commands));
        Self { queue }
    }

    /// Queue an alert; it is shown as soon as the surface is ready
    pub fn schedule(&self, alert: Alert) {
        debug!("Scheduling alert: {}", alert.title);
        if self.queue.send(Command::Present(alert)).is_err() {
            warn!("Alert presenter has stopped");
        }
    }

    /// Wait until every alert scheduled so far has been delivered or dropped
    pub async fn flush(&self) {
        let (done, flushed) = oneshot::channel();
        if self.queue.send(Command::Flush(done)).is_ok() {
            let _ = flushed.await;
        }
    }
}

async fn present_in_order(
    sink: Arc<dyn AlertSink>,
    mut ready: watch::Receiver<bool>,
    mut commands: mpsc::UnboundedReceiver<Command>,
) {
    let mut surface_gone = false;

    while let Some(command) = commands.recv().await {
        match command {
            Command::Present(alert) => {
                if !surface_gone {
                    let shown = ready.wait_for(|is_ready| *is_ready).await.is_ok();
                    surface_gone = !shown;
                }
                if surface_gone {
                    warn!("Surface went away before alert '{}' was shown", alert.title);
                    continue;
                }
                sink.present(alert);
            }
            Command::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
