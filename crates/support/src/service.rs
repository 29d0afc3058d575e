//! Support ticket CRUD service.

use std::sync::Arc;

use opencrm_audit::{AuditAction, AuditCategory, AuditRecorder};
use opencrm_core::{DocumentStore, ServiceError};

use crate::ticket::{Ticket, TicketDraft, COLLECTION};

pub struct SupportService {
    store: Arc<dyn DocumentStore>,
    audit: AuditRecorder,
}

impl SupportService {
    pub fn new(store: Arc<dyn DocumentStore>, audit: AuditRecorder) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> Result<Vec<Ticket>, ServiceError> {
        let docs = self.store.list(COLLECTION)?;
        let tickets = docs
            .iter()
            .map(Ticket::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tickets)
    }

    pub fn create(&self, draft: TicketDraft) -> Result<Ticket, ServiceError> {
        draft.validate()?;

        let id = self.store.create(COLLECTION, draft.to_payload()?)?;
        let ticket = draft.into_ticket(id);

        self.audit.record(
            AuditCategory::Support,
            AuditAction::Create,
            format!(
                "Se creó un nuevo ticket de soporte para el cliente {} (estado: {})",
                ticket.customer, ticket.status
            ),
        );
        Ok(ticket)
    }

    pub fn update(&self, ticket: &Ticket, draft: TicketDraft) -> Result<Ticket, ServiceError> {
        draft.validate()?;

        self.store.update(COLLECTION, ticket.id, draft.to_payload()?)?;
        let updated = draft.into_ticket(ticket.id);

        self.audit.record(
            AuditCategory::Support,
            AuditAction::Update,
            format!(
                "Se actualizó un ticket de soporte del cliente {} (estado: {})",
                updated.customer, updated.status
            ),
        );
        Ok(updated)
    }

    pub fn delete(&self, ticket: &Ticket) -> Result<(), ServiceError> {
        self.store.delete(COLLECTION, ticket.id)?;

        self.audit.record(
            AuditCategory::Support,
            AuditAction::Delete,
            format!(
                "Se eliminó el ticket de soporte del cliente {}",
                ticket.customer
            ),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Mutex, RwLock};

    use chrono::{DateTime, Utc};
    use serde_json::Value as JsonValue;
    use uuid::Uuid;

    use opencrm_audit::{AuditEntry, AuditStore, AuditStoreError, NewAuditEntry};
    use opencrm_core::{Document, DocumentId, StoreError};

    use crate::ticket::TicketStatus;

    use super::*;

    #[derive(Default)]
    struct MemStore {
        collections: RwLock<HashMap<String, Vec<Document>>>,
    }

    impl DocumentStore for MemStore {
        fn create(&self, collection: &str, payload: JsonValue) -> Result<DocumentId, StoreError> {
            let mut collections = self.collections.write().unwrap();
            let id = DocumentId::new();
            collections.entry(collection.to_string()).or_default().push(Document {
                id,
                created_at: Utc::now(),
                payload,
            });
            Ok(id)
        }

        fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
            Ok(self
                .collections
                .read()
                .unwrap()
                .get(collection)
                .cloned()
                .unwrap_or_default())
        }

        fn update(
            &self,
            collection: &str,
            id: DocumentId,
            payload: JsonValue,
        ) -> Result<(), StoreError> {
            let mut collections = self.collections.write().unwrap();
            let doc = collections
                .get_mut(collection)
                .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
                .ok_or_else(|| StoreError::not_found(collection))?;
            doc.payload = payload;
            Ok(())
        }

        fn delete(&self, collection: &str, id: DocumentId) -> Result<(), StoreError> {
            let mut collections = self.collections.write().unwrap();
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

    #[derive(Default)]
    struct VecAudit {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl AuditStore for VecAudit {
        fn append(&self, entry: NewAuditEntry) -> Result<DateTime<Utc>, AuditStoreError> {
            let mut entries = self.entries.lock().unwrap();
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
            let mut entries = self.entries.lock().unwrap().clone();
            entries.reverse();
            Ok(entries)
        }
    }

    fn service() -> (SupportService, AuditRecorder) {
        let audit = AuditRecorder::new(Arc::new(VecAudit::default()));
        (
            SupportService::new(Arc::new(MemStore::default()), audit.clone()),
            audit,
        )
    }

    fn draft(customer: &str, status: TicketStatus) -> TicketDraft {
        TicketDraft {
            customer: customer.to_string(),
            message: "No puedo acceder a mi cuenta".to_string(),
            status,
        }
    }

    #[test]
    fn ticket_lifecycle_updates_store_and_audit() {
        let (service, audit) = service();

        let ticket = service.create(draft("Ana", TicketStatus::Pendiente)).unwrap();
        let ticket = service
            .update(&ticket, draft("Ana", TicketStatus::EnProceso))
            .unwrap();
        assert_eq!(service.list().unwrap()[0].status, TicketStatus::EnProceso);

        service.delete(&ticket).unwrap();
        assert!(service.list().unwrap().is_empty());

        let actions: Vec<_> = audit
            .history()
            .unwrap()
            .into_iter()
            .map(|e| (e.category, e.action))
            .collect();
        assert_eq!(
            actions,
            vec![
                (AuditCategory::Support, AuditAction::Delete),
                (AuditCategory::Support, AuditAction::Update),
                (AuditCategory::Support, AuditAction::Create),
            ]
        );
    }

    #[test]
    fn audit_descriptions_carry_customer_and_status() {
        let (service, audit) = service();

        service.create(draft("Ana", TicketStatus::Pendiente)).unwrap();

        let history = audit.history().unwrap();
        assert_eq!(
            history[0].description,
            "Se creó un nuevo ticket de soporte para el cliente Ana (estado: Pendiente)"
        );
    }

    #[test]
    fn invalid_draft_writes_nothing() {
        let (service, audit) = service();

        let bad = TicketDraft {
            customer: String::new(),
            message: "hola".to_string(),
            status: TicketStatus::Pendiente,
        };
        assert!(service.create(bad).is_err());
        assert!(service.list().unwrap().is_empty());
        assert!(audit.history().unwrap().is_empty());
    }
}
