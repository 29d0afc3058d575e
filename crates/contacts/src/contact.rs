//! Contact entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use opencrm_core::{Document, DocumentId, DomainError, DomainResult, StoreError};

/// Collection the contact book lives in.
pub const COLLECTION: &str = "contactos";

/// A free-text note attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub noted_at: DateTime<Utc>,
}

/// A dated follow-up item attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    pub description: String,
    pub due: NaiveDate,
    pub done: bool,
}

impl TaskItem {
    pub fn is_open(&self) -> bool {
        !self.done
    }
}

/// A contact, as decoded from its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: DocumentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub comments: Vec<Comment>,
    pub tasks: Vec<TaskItem>,
}

/// Document wire form (the id is document metadata, not payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ContactPayload {
    name: String,
    email: String,
    phone: String,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    tasks: Vec<TaskItem>,
}

impl Contact {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let payload: ContactPayload = serde_json::from_value(doc.payload.clone())?;
        Ok(Self {
            id: doc.id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            comments: payload.comments,
            tasks: payload.tasks,
        })
    }

    pub fn to_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            comments: self.comments.clone(),
            tasks: self.tasks.clone(),
        };
        Ok(serde_json::to_value(payload)?)
    }

    pub fn has_open_tasks(&self) -> bool {
        self.tasks.iter().any(TaskItem::is_open)
    }
}

/// Input for creating or updating a contact's base fields.
///
/// Comments and tasks are never part of the draft: they are appended through
/// their own operations and survive a base-field update untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    /// Wire form of a brand-new contact (no comments or tasks yet).
    pub fn initial_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = ContactPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            comments: Vec::new(),
            tasks: Vec::new(),
        };
        Ok(serde_json::to_value(payload)?)
    }

    /// Materialize the contact once the store has assigned its id.
    pub fn into_contact(self, id: DocumentId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            comments: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("contact name must not be empty"));
        }
        if self.email.trim().is_empty() {
            return Err(DomainError::validation("contact email must not be empty"));
        }
        Ok(())
    }
}

/// In-memory filter over a fetched contact list.
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    /// Matches name, email or phone, case-insensitively.
    pub text: Option<String>,
    pub with_comments_only: bool,
    pub with_open_tasks_only: bool,
}

impl ContactFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            let hit = contact.name.to_lowercase().contains(&needle)
                || contact.email.to_lowercase().contains(&needle)
                || contact.phone.contains(needle.as_str());
            if !hit {
                return false;
            }
        }

        if self.with_comments_only && contact.comments.is_empty() {
            return false;
        }

        if self.with_open_tasks_only && !contact.has_open_tasks() {
            return false;
        }

        true
    }

    pub fn apply<'a>(&self, contacts: &'a [Contact]) -> Vec<&'a Contact> {
        contacts.iter().filter(|c| self.matches(c)).collect()
    }
}
