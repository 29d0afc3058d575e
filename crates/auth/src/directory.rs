//! User administration: list profiles, change roles.
//!
//! Admin-only by convention; the permission table gates the view that calls
//! this, nothing is enforced server-side at this boundary.

use std::sync::Arc;

use opencrm_core::IdentityId;

use opencrm_audit::{AuditAction, AuditCategory, AuditRecorder};

use crate::profile::{ProfileStore, ProfileStoreError, UserProfile};
use crate::roles::Role;

pub struct UserDirectory {
    profiles: Arc<dyn ProfileStore>,
    audit: AuditRecorder,
}

impl UserDirectory {
    pub fn new(profiles: Arc<dyn ProfileStore>, audit: AuditRecorder) -> Self {
        Self { profiles, audit }
    }

    /// Every user profile, for the administration table.
    pub fn list(&self) -> Result<Vec<UserProfile>, ProfileStoreError> {
        self.profiles.list()
    }

    /// Change a user's role, then record the change in the audit trail.
    pub fn change_role(
        &self,
        identity_id: IdentityId,
        role: Role,
    ) -> Result<(), ProfileStoreError> {
        self.profiles.set_role(identity_id, role)?;

        self.audit.record(
            AuditCategory::User,
            AuditAction::RoleChange,
            format!("Cambió el rol de {identity_id} a {role}"),
        );

        Ok(())
    }
}
