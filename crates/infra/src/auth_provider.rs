//! In-memory authentication provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};

use opencrm_auth::{AuthError, AuthListener, AuthProvider, Identity, ListenerId};
use opencrm_core::IdentityId;

/// Minimum accepted password length, matching the hosted provider's policy.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone)]
struct Account {
    identity: Identity,
    password: String,
}

/// In-memory identity provider.
///
/// Intended for tests/dev. Reproduces the hosted provider's observable
/// behavior: credential checks with the full error surface, one current
/// session, and state-change listeners that fire immediately on subscribe
/// and again on every change.
///
/// Listeners are invoked synchronously; they must not call back into the
/// provider.
#[derive(Default)]
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: RwLock<Option<Identity>>,
    listeners: Mutex<HashMap<u64, AuthListener>>,
    next_listener: AtomicU64,
}

impl InMemoryAuthProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current signed-in identity, if any.
    pub fn current(&self) -> Option<Identity> {
        self.current.read().ok().and_then(|c| c.clone())
    }

    fn set_current(&self, identity: Option<Identity>) {
        if let Ok(mut current) = self.current.write() {
            *current = identity.clone();
        }
        self.notify(identity);
    }

    fn notify(&self, identity: Option<Identity>) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.values() {
                listener(identity.clone());
            }
        }
    }
}

impl AuthProvider for InMemoryAuthProvider {
    fn subscribe(&self, listener: AuthListener) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);

        // Immediate replay of the current state, then live changes.
        listener(self.current());

        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.insert(id, listener);
        }
        ListenerId(id)
    }

    fn unsubscribe(&self, listener: ListenerId) {
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.remove(&listener.0);
        }
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = {
            let accounts = self
                .accounts
                .read()
                .map_err(|_| AuthError::Other("lock poisoned".to_string()))?;

            let account = accounts.get(email).ok_or(AuthError::InvalidCredentials)?;
            if account.password != password {
                return Err(AuthError::InvalidCredentials);
            }
            account.identity.clone()
        };

        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if !email.contains('@') || email.trim().len() < 3 {
            return Err(AuthError::InvalidEmail);
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let identity = {
            let mut accounts = self
                .accounts
                .write()
                .map_err(|_| AuthError::Other("lock poisoned".to_string()))?;

            if accounts.contains_key(email) {
                return Err(AuthError::EmailInUse);
            }

            let identity = Identity::new(IdentityId::new(), email);
            accounts.insert(
                email.to_string(),
                Account {
                    identity: identity.clone(),
                    password: password.to_string(),
                },
            );
            identity
        };

        // The provider signs a fresh account straight in.
        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&self) {
        self.set_current(None);
    }
}
