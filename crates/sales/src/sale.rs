//! Sale entity and list-view queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use opencrm_core::{Document, DocumentId, DomainError, DomainResult, StoreError};

/// Collection sales are stored in.
pub const COLLECTION: &str = "ventas";

/// Sale status lifecycle. Wire values match the store's existing data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    Pendiente,
    Pagada,
    Cancelada,
}

impl SaleStatus {
    /// A sale still counts as open while payment is pending.
    pub fn is_open(&self) -> bool {
        matches!(self, SaleStatus::Pendiente)
    }
}

impl core::fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            SaleStatus::Pendiente => "Pendiente",
            SaleStatus::Pagada => "Pagada",
            SaleStatus::Cancelada => "Cancelada",
        };
        f.write_str(s)
    }
}

/// A sale, as decoded from its document.
///
/// `created_at` is the store-assigned creation timestamp (document
/// metadata, not payload).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sale {
    pub id: DocumentId,
    pub customer: String,
    /// Amount in smallest currency unit (e.g., cents).
    pub amount_cents: u64,
    pub status: SaleStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SalePayload {
    customer: String,
    amount_cents: u64,
    status: SaleStatus,
}

impl Sale {
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let payload: SalePayload = serde_json::from_value(doc.payload.clone())?;
        Ok(Self {
            id: doc.id,
            customer: payload.customer,
            amount_cents: payload.amount_cents,
            status: payload.status,
            created_at: doc.created_at,
        })
    }

    pub fn to_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = SalePayload {
            customer: self.customer.clone(),
            amount_cents: self.amount_cents,
            status: self.status,
        };
        Ok(serde_json::to_value(payload)?)
    }
}

/// Input for creating or updating a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDraft {
    pub customer: String,
    pub amount_cents: u64,
    pub status: SaleStatus,
}

impl SaleDraft {
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer.trim().is_empty() {
            return Err(DomainError::validation("sale customer must not be empty"));
        }
        Ok(())
    }

    pub fn to_payload(&self) -> Result<JsonValue, StoreError> {
        let payload = SalePayload {
            customer: self.customer.clone(),
            amount_cents: self.amount_cents,
            status: self.status,
        };
        Ok(serde_json::to_value(payload)?)
    }
}

/// Ordering of the sales list by amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountOrder {
    #[default]
    Ascending,
    Descending,
}

/// In-memory filter/sort over a fetched sales list.
#[derive(Debug, Clone, Default)]
pub struct SaleFilter {
    /// Case-insensitive customer-name search.
    pub search: Option<String>,
    /// Keep only sales in this status.
    pub status: Option<SaleStatus>,
    pub order: AmountOrder,
}

impl SaleFilter {
    pub fn matches(&self, sale: &Sale) -> bool {
        if let Some(search) = &self.search {
            if !sale.customer.to_lowercase().contains(&search.to_lowercase()) {
                return false;
            }
        }
        match self.status {
            Some(status) => sale.status == status,
            None => true,
        }
    }

    /// Filter then sort by amount in the requested order.
    pub fn apply(&self, sales: &[Sale]) -> Vec<Sale> {
        let mut hits: Vec<Sale> = sales.iter().filter(|s| self.matches(s)).cloned().collect();
        match self.order {
            AmountOrder::Ascending => hits.sort_by_key(|s| s.amount_cents),
            AmountOrder::Descending => {
                hits.sort_by_key(|s| core::cmp::Reverse(s.amount_cents))
            }
        }
        hits
    }
}
