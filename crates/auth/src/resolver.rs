//! Session/identity resolver.
//!
//! Subscribes to the identity provider's state-change stream and maintains
//! the session triple. Signed-out events settle synchronously; signed-in
//! events leave a role lookup in flight, represented by an explicit
//! [`RoleLookup`] value carrying a staleness token.
//!
//! ## Last event wins
//!
//! Two lookups can genuinely interleave: a second auth event may arrive
//! before the first event's profile fetch settles. Every event bumps an
//! epoch counter; a lookup may only apply its result while its token still
//! matches the epoch, checked under the state lock. Stale results are
//! discarded, so a superseded identity can never overwrite newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};
use std::thread;

use crate::identity::Identity;
use crate::profile::{ProfileStore, ProfileStoreError, UserProfile};
use crate::provider::{AuthProvider, ListenerId};
use crate::session::{SessionSnapshot, SessionSubscription};

/// Staleness/cancellation token for one in-flight role lookup.
///
/// The token is pinned to the epoch of the auth event that issued it; any
/// later event (including sign-out and session teardown) advances the epoch
/// and thereby cancels the lookup.
#[derive(Debug, Clone)]
pub struct LookupToken {
    epoch: u64,
    current: Arc<AtomicU64>,
}

impl LookupToken {
    /// Whether a newer auth event has superseded this lookup.
    ///
    /// Advisory fast path; the authoritative check happens under the state
    /// lock when the result is applied.
    pub fn is_stale(&self) -> bool {
        self.current.load(Ordering::Acquire) != self.epoch
    }
}

/// A profile lookup that must settle before the session stops resolving.
#[derive(Debug)]
pub struct RoleLookup {
    pub identity: Identity,
    pub token: LookupToken,
}

struct ResolverShared {
    state: Mutex<SessionSnapshot>,
    /// Bumped (under the state lock) on every auth event.
    epoch: Arc<AtomicU64>,
    subscribers: Mutex<Vec<mpsc::Sender<SessionSnapshot>>>,
}

/// Owner of the session triple `(identity, role, resolving)`.
///
/// One resolver exists per session scope and is handed down explicitly;
/// there is no ambient global. Cheap to clone (shared handle).
#[derive(Clone)]
pub struct SessionResolver {
    shared: Arc<ResolverShared>,
}

impl SessionResolver {
    /// New resolver in the pre-first-callback state: nothing known yet,
    /// `resolving = true`.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(ResolverShared {
                state: Mutex::new(SessionSnapshot::initial()),
                epoch: Arc::new(AtomicU64::new(0)),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Current session state, cloned.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock_state().clone()
    }

    /// Subscribe to session transitions.
    ///
    /// The subscription delivers transitions only; call [`snapshot`] for the
    /// current state. Dead subscriptions are pruned on the next publish.
    ///
    /// [`snapshot`]: SessionResolver::snapshot
    pub fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::channel();

        if let Ok(mut subs) = self.shared.subscribers.lock() {
            subs.push(tx);
        }

        SessionSubscription::new(rx)
    }

    /// Handle one identity-change event from the provider.
    ///
    /// Signed-out events settle synchronously and return `None` (no store
    /// lookup). Signed-in events set `(identity, no role, resolving)` and
    /// return the lookup that must be driven to settle the session.
    pub fn on_auth_change(&self, identity: Option<Identity>) -> Option<RoleLookup> {
        let mut state = self.lock_state();
        let epoch = self.shared.epoch.fetch_add(1, Ordering::AcqRel) + 1;

        match identity {
            None => {
                *state = SessionSnapshot::signed_out();
                self.publish(&state);
                None
            }
            Some(identity) => {
                *state = SessionSnapshot::resolving(identity.clone());
                self.publish(&state);
                Some(RoleLookup {
                    identity,
                    token: LookupToken {
                        epoch,
                        current: Arc::clone(&self.shared.epoch),
                    },
                })
            }
        }
    }

    /// Settle a lookup with the profile store's outcome.
    ///
    /// Lookup failure and missing profiles both degrade to "no role"
    /// (fail-closed for permissions, never fail-open-to-admin). Results from
    /// a superseded epoch are discarded.
    pub fn apply_lookup(
        &self,
        token: &LookupToken,
        outcome: Result<Option<UserProfile>, ProfileStoreError>,
    ) {
        let role = match outcome {
            Ok(Some(profile)) => profile.role,
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "role lookup failed; continuing with no role");
                None
            }
        };

        let mut state = self.lock_state();

        // Authoritative staleness check: the epoch only changes under this
        // lock, so a match here means no newer event has landed.
        if self.shared.epoch.load(Ordering::Acquire) != token.epoch {
            tracing::debug!("discarding role lookup superseded by a newer auth event");
            return;
        }

        let Some(identity) = state.identity.clone() else {
            // Unreachable while the epoch matches; kept as a guard so a
            // stale token can never fabricate a signed-in session.
            return;
        };

        *state = SessionSnapshot::settled(identity, role);
        self.publish(&state);
    }

    /// Drive one lookup to completion against a profile store.
    pub fn resolve(&self, profiles: &dyn ProfileStore, lookup: RoleLookup) {
        if lookup.token.is_stale() {
            tracing::debug!("skipping role lookup superseded before it started");
            return;
        }

        let outcome = profiles.fetch(lookup.identity.id);
        self.apply_lookup(&lookup.token, outcome);
    }

    /// Register with the provider and spawn the lookup worker.
    ///
    /// Exactly one listener is registered for the life of the returned
    /// binding; dropping it unregisters the listener, closes the lookup
    /// queue and joins the worker, so nothing leaks across remounts of the
    /// owning scope.
    pub fn bind(
        &self,
        provider: Arc<dyn AuthProvider>,
        profiles: Arc<dyn ProfileStore>,
    ) -> SessionBinding {
        let (queue_tx, queue_rx) = mpsc::channel::<RoleLookup>();

        let worker_resolver = self.clone();
        let worker = thread::spawn(move || {
            while let Ok(lookup) = queue_rx.recv() {
                worker_resolver.resolve(profiles.as_ref(), lookup);
            }
        });

        let listener_resolver = self.clone();
        let listener_queue = Mutex::new(queue_tx.clone());
        let listener = provider.subscribe(Box::new(move |identity| {
            if let Some(lookup) = listener_resolver.on_auth_change(identity) {
                if let Ok(tx) = listener_queue.lock() {
                    let _ = tx.send(lookup);
                }
            }
        }));

        SessionBinding {
            provider,
            listener,
            queue: Some(queue_tx),
            worker: Some(worker),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionSnapshot> {
        // Snapshots are replaced wholesale, so a poisoned lock still holds a
        // coherent value.
        self.shared
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publish a transition; called with the state lock held so subscribers
    /// observe transitions in order.
    fn publish(&self, snapshot: &SessionSnapshot) {
        if let Ok(mut subs) = self.shared.subscribers.lock() {
            subs.retain(|tx| tx.send(snapshot.clone()).is_ok());
        }
    }
}

impl Default for SessionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Live attachment of a resolver to an identity provider.
///
/// Owns the provider listener registration and the lookup worker thread.
pub struct SessionBinding {
    provider: Arc<dyn AuthProvider>,
    listener: ListenerId,
    queue: Option<mpsc::Sender<RoleLookup>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl Drop for SessionBinding {
    fn drop(&mut self) {
        // Unregister first so the listener's queue clone is dropped too;
        // only then does the worker's channel actually close.
        self.provider.unsubscribe(self.listener);
        self.queue.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
