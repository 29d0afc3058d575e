//! In-memory user-profile store.

use std::collections::HashMap;
use std::sync::RwLock;

use opencrm_auth::{ProfileStore, ProfileStoreError, Role, UserProfile};
use opencrm_core::IdentityId;

/// In-memory profile store keyed by identity id.
///
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<IdentityId, UserProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn fetch(&self, identity_id: IdentityId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| ProfileStoreError::backend("lock poisoned"))?;
        Ok(profiles.get(&identity_id).cloned())
    }

    fn upsert(&self, profile: UserProfile) -> Result<(), ProfileStoreError> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| ProfileStoreError::backend("lock poisoned"))?;
        profiles.insert(profile.identity_id, profile);
        Ok(())
    }

    fn set_role(&self, identity_id: IdentityId, role: Role) -> Result<(), ProfileStoreError> {
        let mut profiles = self
            .profiles
            .write()
            .map_err(|_| ProfileStoreError::backend("lock poisoned"))?;
        let profile = profiles
            .get_mut(&identity_id)
            .ok_or(ProfileStoreError::NotFound(identity_id))?;
        profile.role = Some(role);
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserProfile>, ProfileStoreError> {
        let profiles = self
            .profiles
            .read()
            .map_err(|_| ProfileStoreError::backend("lock poisoned"))?;

        let mut all: Vec<UserProfile> = profiles.values().cloned().collect();
        all.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(all)
    }
}
