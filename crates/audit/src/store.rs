//! Audit-store contract.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::entry::{AuditEntry, NewAuditEntry};

/// Audit-store operation error.
#[derive(Debug, Error)]
pub enum AuditStoreError {
    /// The backend rejected or failed the request.
    #[error("audit store backend error: {0}")]
    Backend(String),
}

impl AuditStoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Append-only store for audit entries.
///
/// ## Design principles
///
/// - **Append-only**: no update or delete surface exists at all.
/// - **Store-assigned time**: `append` returns the timestamp the store's own
///   clock assigned, so entries are globally orderable for display.
/// - **Unpaginated read**: `list_all` returns everything newest first. This
///   is acceptable only while entry volume stays small; a larger deployment
///   would need pagination here first.
pub trait AuditStore: Send + Sync {
    /// Append one entry; returns the store-assigned timestamp.
    fn append(&self, entry: NewAuditEntry) -> Result<DateTime<Utc>, AuditStoreError>;

    /// Every entry, newest first.
    fn list_all(&self) -> Result<Vec<AuditEntry>, AuditStoreError>;
}
