//! Session state and its subscription surface.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::identity::Identity;
use crate::roles::Role;

/// The resolver-owned triple tracking current identity, role and
/// resolution-in-progress status.
///
/// # Invariants
/// - A session has exactly one current role value at any time (or none).
/// - Snapshots are replaced wholesale, never field-mutated, so observers can
///   never see a partially-updated triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub role: Option<Role>,
    pub resolving: bool,
}

impl SessionSnapshot {
    /// State before the provider's first state-change callback has fired.
    pub fn initial() -> Self {
        Self {
            identity: None,
            role: None,
            resolving: true,
        }
    }

    /// Signed-out state: identity cleared, role cleared, nothing pending.
    pub fn signed_out() -> Self {
        Self {
            identity: None,
            role: None,
            resolving: false,
        }
    }

    /// Signed-in but with the role lookup still in flight.
    pub fn resolving(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            role: None,
            resolving: true,
        }
    }

    /// Fully settled state for a signed-in identity.
    pub fn settled(identity: Identity, role: Option<Role>) -> Self {
        Self {
            identity: Some(identity),
            role,
            resolving: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// A read-only subscription to session transitions.
///
/// Each subscription gets a copy of every snapshot the resolver publishes,
/// in publication order. Designed for single-threaded consumption.
#[derive(Debug)]
pub struct SessionSubscription {
    receiver: Receiver<SessionSnapshot>,
}

impl SessionSubscription {
    pub(crate) fn new(receiver: Receiver<SessionSnapshot>) -> Self {
        Self { receiver }
    }

    /// Block until the next transition is published.
    pub fn recv(&self) -> Result<SessionSnapshot, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a transition without blocking.
    pub fn try_recv(&self) -> Result<SessionSnapshot, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a transition.
    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<SessionSnapshot, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}
