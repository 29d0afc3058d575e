//! Contact CRUD service.
//!
//! Every mutation is one store request followed by one best-effort audit
//! entry; the pair is deliberately not transactional.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use opencrm_audit::{AuditAction, AuditCategory, AuditRecorder};
use opencrm_core::{DocumentStore, DomainError, ServiceError};

use crate::contact::{Comment, Contact, ContactDraft, TaskItem, COLLECTION};

pub struct ContactService {
    store: Arc<dyn DocumentStore>,
    audit: AuditRecorder,
}

impl ContactService {
    pub fn new(store: Arc<dyn DocumentStore>, audit: AuditRecorder) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> Result<Vec<Contact>, ServiceError> {
        let docs = self.store.list(COLLECTION)?;
        let contacts = docs
            .iter()
            .map(Contact::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    pub fn create(&self, draft: ContactDraft) -> Result<Contact, ServiceError> {
        draft.validate()?;

        let id = self.store.create(COLLECTION, draft.initial_payload()?)?;
        let contact = draft.into_contact(id);

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::Create,
            format!("Creó contacto: {}", contact.name),
        );
        Ok(contact)
    }

    /// Update the base fields; comments and tasks survive untouched.
    pub fn update(&self, contact: &Contact, draft: ContactDraft) -> Result<Contact, ServiceError> {
        draft.validate()?;

        let updated = Contact {
            id: contact.id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            comments: contact.comments.clone(),
            tasks: contact.tasks.clone(),
        };
        self.store.update(COLLECTION, updated.id, updated.to_payload()?)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::Update,
            format!("Actualizó contacto: {}", updated.name),
        );
        Ok(updated)
    }

    pub fn delete(&self, contact: &Contact) -> Result<(), ServiceError> {
        self.store.delete(COLLECTION, contact.id)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::Delete,
            format!("Eliminó contacto: {}", contact.name),
        );
        Ok(())
    }

    pub fn add_comment(&self, contact: &Contact, text: &str) -> Result<Contact, ServiceError> {
        if text.trim().is_empty() {
            return Err(DomainError::validation("comment must not be empty").into());
        }

        let mut updated = contact.clone();
        updated.comments.push(Comment {
            text: text.to_string(),
            noted_at: Utc::now(),
        });
        self.store.update(COLLECTION, updated.id, updated.to_payload()?)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::Comment,
            format!("Agregó comentario: \"{text}\""),
        );
        Ok(updated)
    }

    pub fn add_task(
        &self,
        contact: &Contact,
        description: &str,
        due: NaiveDate,
    ) -> Result<Contact, ServiceError> {
        if description.trim().is_empty() {
            return Err(DomainError::validation("task description must not be empty").into());
        }

        let mut updated = contact.clone();
        updated.tasks.push(TaskItem {
            description: description.to_string(),
            due,
            done: false,
        });
        self.store.update(COLLECTION, updated.id, updated.to_payload()?)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::TaskAdded,
            format!("Agregó tarea: \"{description}\""),
        );
        Ok(updated)
    }

    pub fn complete_task(&self, contact: &Contact, index: usize) -> Result<Contact, ServiceError> {
        let mut updated = contact.clone();
        let task = updated
            .tasks
            .get_mut(index)
            .ok_or(DomainError::NotFound)?;
        task.done = true;
        let description = task.description.clone();

        self.store.update(COLLECTION, updated.id, updated.to_payload()?)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::TaskCompleted,
            format!("Completó tarea: \"{description}\""),
        );
        Ok(updated)
    }

    pub fn remove_task(&self, contact: &Contact, index: usize) -> Result<Contact, ServiceError> {
        let mut updated = contact.clone();
        if index >= updated.tasks.len() {
            return Err(DomainError::NotFound.into());
        }
        let task = updated.tasks.remove(index);

        self.store.update(COLLECTION, updated.id, updated.to_payload()?)?;

        self.audit.record(
            AuditCategory::Contact,
            AuditAction::TaskRemoved,
            format!("Eliminó tarea: \"{}\"", task.description),
        );
        Ok(updated)
    }
}
