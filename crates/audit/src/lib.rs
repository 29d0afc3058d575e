//! `opencrm-audit` — append-only audit trail for mutating actions.
//!
//! Every create/update/delete in the application is followed by one audit
//! entry describing what changed and when. Recording is **best-effort**: a
//! failed append never blocks or rolls back the mutation it describes.

pub mod entry;
pub mod recorder;
pub mod store;

pub use entry::{AuditAction, AuditCategory, AuditEntry, NewAuditEntry};
pub use recorder::{AuditRecorder, RecordOutcome};
pub use store::{AuditStore, AuditStoreError};
