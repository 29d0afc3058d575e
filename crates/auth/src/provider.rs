//! Authentication-provider contract.
//!
//! The identity provider is an external collaborator; this module pins down
//! the surface the core observes: a state-change stream plus sign-in,
//! sign-up and sign-out calls. A test/dev implementation lives in
//! `opencrm-infra`.

use thiserror::Error;

use crate::identity::Identity;

/// Authentication failure surfaced to the user as a message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailInUse,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("password is too weak")]
    WeakPassword,

    #[error("authentication failed: {0}")]
    Other(String),
}

/// Handle identifying one registered state-change listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Callback invoked on every authentication state change. `None` means
/// signed out.
pub type AuthListener = Box<dyn Fn(Option<Identity>) + Send + Sync>;

/// External identity provider.
///
/// Listener semantics follow the hosted provider this abstracts: a freshly
/// registered listener is invoked immediately with the current state, then
/// again on every change, until unsubscribed.
pub trait AuthProvider: Send + Sync {
    /// Register a state-change listener; it fires once immediately.
    fn subscribe(&self, listener: AuthListener) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn unsubscribe(&self, listener: ListenerId);

    fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    fn sign_up(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Sign the current user out; listeners observe the change.
    fn sign_out(&self);
}
