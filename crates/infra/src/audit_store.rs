//! In-memory audit store.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use opencrm_audit::{AuditEntry, AuditStore, AuditStoreError, NewAuditEntry};

/// In-memory append-only audit store.
///
/// Intended for tests/dev. Timestamps and sequence numbers come from this
/// store, never the caller, matching the hosted service's server-clock
/// semantics.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    entries: Mutex<Vec<AuditEntry>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn append(&self, entry: NewAuditEntry) -> Result<DateTime<Utc>, AuditStoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AuditStoreError::backend("lock poisoned"))?;

        let recorded_at = Utc::now();
        let sequence = entries.len() as u64 + 1;
        entries.push(AuditEntry {
            entry_id: Uuid::now_v7(),
            sequence,
            category: entry.category,
            action: entry.action,
            description: entry.description,
            recorded_at,
        });
        Ok(recorded_at)
    }

    fn list_all(&self) -> Result<Vec<AuditEntry>, AuditStoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AuditStoreError::backend("lock poisoned"))?;

        // Sequence order equals timestamp order here (one clock, append
        // under the lock); newest first for display.
        let mut all = entries.clone();
        all.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        Ok(all)
    }
}
