//! Audit entry model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain area an audit entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditCategory {
    Contact,
    Sale,
    Support,
    Campaign,
    User,
}

impl core::fmt::Display for AuditCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            AuditCategory::Contact => "contact",
            AuditCategory::Sale => "sale",
            AuditCategory::Support => "support",
            AuditCategory::Campaign => "campaign",
            AuditCategory::User => "user",
        };
        f.write_str(s)
    }
}

/// What kind of mutation the entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Comment,
    TaskAdded,
    TaskCompleted,
    TaskRemoved,
    RoleChange,
    Dispatch,
}

impl core::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            AuditAction::Create => "create",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
            AuditAction::Comment => "comment",
            AuditAction::TaskAdded => "task_added",
            AuditAction::TaskCompleted => "task_completed",
            AuditAction::TaskRemoved => "task_removed",
            AuditAction::RoleChange => "role_change",
            AuditAction::Dispatch => "dispatch",
        };
        f.write_str(s)
    }
}

/// An entry ready to be appended (no timestamp or sequence yet).
///
/// The store assigns `recorded_at` and `sequence` during append, the same way
/// the backing database assigns server timestamps: entries stay consistently
/// orderable even when callers' clocks disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuditEntry {
    pub category: AuditCategory,
    pub action: AuditAction,
    pub description: String,
}

impl NewAuditEntry {
    pub fn new(
        category: AuditCategory,
        action: AuditAction,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            action,
            description: description.into(),
        }
    }
}

/// A persisted audit entry.
///
/// # Invariants
/// - Entries are append-only: never updated, never deleted.
/// - `sequence` is monotonically increasing in append order.
/// - `recorded_at` comes from the store's clock, not the caller's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub entry_id: Uuid,
    pub sequence: u64,
    pub category: AuditCategory,
    pub action: AuditAction,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}
