//! Authenticated principal reference.

use serde::{Deserialize, Serialize};

use opencrm_core::IdentityId;

/// The external authentication principal representing a signed-in user.
///
/// Owned by the identity provider; the session holds a read-only reference
/// for its lifetime. Roles are deliberately *not* part of the identity: they
/// come from the per-user profile record and may change independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
}

impl Identity {
    pub fn new(id: IdentityId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}
