//! Best-effort audit recorder.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::entry::{AuditAction, AuditCategory, AuditEntry, NewAuditEntry};
use crate::store::{AuditStore, AuditStoreError};

/// What happened to one recording attempt.
///
/// There is deliberately no error variant: the recorder is always invoked
/// *after* its primary mutation committed, and audit completeness is
/// best-effort rather than guaranteed. Callers that care (tests, mostly) can
/// inspect the outcome; production call sites ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The entry was appended; carries the store-assigned timestamp.
    Recorded(DateTime<Utc>),
    /// The append failed; the failure was logged and swallowed.
    Dropped,
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded(_))
    }
}

/// Write-only side effect invoked by every mutating operation.
#[derive(Clone)]
pub struct AuditRecorder {
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Append one audit entry describing an already-committed mutation.
    ///
    /// Never fails visibly and never panics: a store failure is logged and
    /// swallowed so the primary feature stays available.
    pub fn record(
        &self,
        category: AuditCategory,
        action: AuditAction,
        description: impl Into<String>,
    ) -> RecordOutcome {
        let entry = NewAuditEntry::new(category, action, description);

        match self.store.append(entry) {
            Ok(recorded_at) => RecordOutcome::Recorded(recorded_at),
            Err(err) => {
                tracing::warn!(%category, %action, error = %err, "audit append failed; entry dropped");
                RecordOutcome::Dropped
            }
        }
    }

    /// The history view's read path: every entry, newest first.
    ///
    /// Unlike `record`, read failures surface to the caller.
    pub fn history(&self) -> Result<Vec<AuditEntry>, AuditStoreError> {
        self.store.list_all()
    }
}
