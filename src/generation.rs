//! Generation counters for superseding in-flight requests
//!
//! Each new request mints a ticket. A completion is applied only if its
//! ticket is still the latest one issued; anything older is stale and its
//! result is dropped. Cancelling bumps the counter without issuing a ticket.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter of issued requests
#[derive(Debug, Default)]
pub struct Generation {
    latest: AtomicU64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one
    pub fn mint(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Invalidate every outstanding ticket
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether `ticket` is still the most recent one
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }
}
