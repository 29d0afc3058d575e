//! In-memory document store.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use serde_json::Value as JsonValue;

use opencrm_core::{Document, DocumentId, DocumentStore, StoreError};

/// In-memory document store over named collections.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn create(&self, collection: &str, payload: JsonValue) -> Result<DocumentId, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let id = DocumentId::new();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id,
                // The store's own clock, mirroring the hosted service's
                // server-assigned timestamps.
                created_at: Utc::now(),
                payload,
            });
        Ok(id)
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    fn update(
        &self,
        collection: &str,
        id: DocumentId,
        payload: JsonValue,
    ) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
            .ok_or_else(|| StoreError::not_found(collection))?;
        doc.payload = payload;
        Ok(())
    }

    fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(StoreError::not_found(collection));
        }
        Ok(())
    }
}
