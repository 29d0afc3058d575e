//! Support ticket entity.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use opencrm_core::{Document, DocumentId, DomainError, DomainResult, StoreError};

/// Collection tickets are stored in.
pub const COLLECTION: &str = "soporte";

/// Ticket lifecycle. Wire values match the store's existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Pendiente,
    #[serde(rename = "En proceso")]
    EnProceso,
    Cerrado,
}

impl TicketStatus {
    /// Anything not closed still needs attention.
    pub fn is_open(&self) -> bool {
        !matches!(self, TicketStatus::Cerrado)
    }
}

impl core::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            TicketStatus::Pendiente => "Pendiente",
            TicketStatus::EnProceso => "En proceso",
            TicketStatus::Cerrado => "Cerrado",
        };
        f.write_str(s)
    }
}

/// A support ticket, as decoded from its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: DocumentId,
    pub customer: String,
    pub message: String,
    pub status: TicketStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TicketPayload {
    customer: String,
    message: String,
    status: TicketStatus,
}

impl Ticket {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let payload: TicketPayload = serde_json::from_value(doc.payload.clone())?;
        Ok(Self {
            id: doc.id,
            customer: payload.customer,
            message: payload.message,
            status: payload.status,
        })
    }
}

/// Input for creating or updating a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub customer: String,
    pub message: String,
    pub status: TicketStatus,
}

impl TicketDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer.trim().is_empty() {
            return Err(DomainError::validation("ticket customer must not be empty"));
        }
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("ticket message must not be empty"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = TicketPayload {
            customer: self.customer.clone(),
            message: self.message.clone(),
            status: self.status,
        };
        Ok(serde_json::to_value(payload)?)
    }

    pub fn into_ticket(self, id: DocumentId) -> Ticket {
        Ticket {
            id,
            customer: self.customer,
            message: self.message,
            status: self.status,
        }
    }
}
