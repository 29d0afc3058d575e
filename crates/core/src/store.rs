//! Document-store contract.
//!
//! The hosted document database is an external collaborator: every data
//! operation is a single create/read-all/update/delete request against a
//! named collection. This module pins down the observable surface of that
//! collaborator; implementations live in `opencrm-infra` (in-memory, for
//! tests/dev) or behind a real client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::id::DocumentId;

/// A document as read back from a collection.
///
/// `created_at` is assigned by the store's own clock when the document is
/// created, so documents are consistently orderable even under caller clock
/// skew. The payload is schemaless JSON; domain crates decode it into their
/// typed entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub created_at: DateTime<Utc>,
    pub payload: JsonValue,
}

/// Document-store operation error.
///
/// These are **infrastructure errors** (backend, serialization, missing
/// documents) as opposed to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted document does not exist in the collection.
    #[error("document not found in '{collection}'")]
    NotFound { collection: String },

    /// The backend rejected or failed the request.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A payload could not be encoded or decoded.
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(collection: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
        }
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Generic create/read-all/update/delete access to named collections.
///
/// ## Design principles
///
/// - **Fire-and-forget requests**: each operation is one request; no retries,
///   queueing or batching happens at this boundary.
/// - **No query surface**: callers fetch whole collections and filter in
///   memory (acceptable for the small volumes this system assumes).
/// - **Opaque payloads**: the store never interprets documents; typing is the
///   domain crates' job.
pub trait DocumentStore: Send + Sync {
    /// Create a document; the store assigns its id and `created_at`.
    fn create(&self, collection: &str, payload: JsonValue) -> Result<DocumentId, StoreError>;

    /// Read every document in a collection.
    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Replace an existing document's payload (`created_at` is preserved).
    fn update(&self, collection: &str, id: DocumentId, payload: JsonValue)
    -> Result<(), StoreError>;

    /// Delete a document.
    fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError>;
}
