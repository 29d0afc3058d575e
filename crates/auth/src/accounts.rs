//! Sign-in / registration / sign-out flows.

use std::sync::Arc;

use crate::identity::Identity;
use crate::profile::{ProfileStore, UserProfile};
use crate::provider::{AuthError, AuthProvider};
use crate::roles::Role;

/// Role assigned to freshly registered users.
const DEFAULT_ROLE: Role = Role::Vendedor;

/// Account flows over the identity provider and the profile store.
pub struct AccountService {
    provider: Arc<dyn AuthProvider>,
    profiles: Arc<dyn ProfileStore>,
}

impl AccountService {
    pub fn new(provider: Arc<dyn AuthProvider>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { provider, profiles }
    }

    /// Sign an existing user in. The resolver picks the session up through
    /// the provider's state-change stream; nothing else to do here.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.provider.sign_in(email, password)
    }

    /// Register a new account and seed its profile with the default role.
    ///
    /// The profile write is part of registration, not best-effort: a user
    /// without a profile would sign in with no role at all, so the failure
    /// surfaces (as `AuthError::Other`) instead of being swallowed.
    pub fn register(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_up(email, password)?;

        let profile = UserProfile::new(identity.id, identity.email.clone(), Some(DEFAULT_ROLE));
        self.profiles.upsert(profile).map_err(|err| {
            tracing::error!(error = %err, "profile write failed after sign-up");
            AuthError::Other(err.to_string())
        })?;

        Ok(identity)
    }

    /// Sign the current user out; listeners observe the change.
    pub fn sign_out(&self) {
        self.provider.sign_out();
    }
}
