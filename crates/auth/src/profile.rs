//! User-profile store contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use opencrm_core::IdentityId;

use crate::roles::Role;

/// Per-user profile record keyed by identity id.
///
/// The `role` field may be absent: a profile without one behaves exactly
/// like a missing profile for authorization purposes (no role, no access to
/// role-gated views).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub identity_id: IdentityId,
    pub email: String,
    pub role: Option<Role>,
}

impl UserProfile {
    pub fn new(identity_id: IdentityId, email: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            identity_id,
            email: email.into(),
            role,
        }
    }
}

/// Profile-store operation error.
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    /// The backend rejected or failed the request.
    #[error("profile store backend error: {0}")]
    Backend(String),

    /// No profile exists for the identity (only for operations that require
    /// one, such as a role change; `fetch` reports absence as `Ok(None)`).
    #[error("no profile for identity {0}")]
    NotFound(IdentityId),
}

impl ProfileStoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Store of per-user profile records.
pub trait ProfileStore: Send + Sync {
    /// Look up a profile; absence is not an error.
    fn fetch(&self, identity_id: IdentityId) -> Result<Option<UserProfile>, ProfileStoreError>;

    /// Create or replace a profile (used by registration).
    fn upsert(&self, profile: UserProfile) -> Result<(), ProfileStoreError>;

    /// Change an existing profile's role.
    fn set_role(&self, identity_id: IdentityId, role: Role) -> Result<(), ProfileStoreError>;

    /// Every profile, for the user-administration view.
    fn list(&self) -> Result<Vec<UserProfile>, ProfileStoreError>;
}
