//! Sales CRUD service.

use std::sync::Arc;

use opencrm_audit::{AuditAction, AuditCategory, AuditRecorder};
use opencrm_core::{paginate, DocumentStore, Page, Pagination, ServiceError};

use crate::sale::{Sale, SaleDraft, SaleFilter, COLLECTION};

pub struct SalesService {
    store: Arc<dyn DocumentStore>,
    audit: AuditRecorder,
}

impl SalesService {
    pub fn new(store: Arc<dyn DocumentStore>, audit: AuditRecorder) -> Self {
        Self { store, audit }
    }

    pub fn list(&self) -> Result<Vec<Sale>, ServiceError> {
        let docs = self.store.list(COLLECTION)?;
        let sales = docs
            .iter()
            .map(Sale::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sales)
    }

    /// One page of the filtered, ordered sales list.
    pub fn search(&self, filter: &SaleFilter, pagination: Pagination) -> Result<Page<Sale>, ServiceError> {
        let sales = self.list()?;
        Ok(paginate(&filter.apply(&sales), pagination))
    }

    pub fn create(&self, draft: SaleDraft) -> Result<Sale, ServiceError> {
        draft.validate()?;

        let id = self.store.create(COLLECTION, draft.to_payload()?)?;

        self.audit.record(
            AuditCategory::Sale,
            AuditAction::Create,
            format!("Nueva venta registrada para {}", draft.customer),
        );

        // The listed document carries the store-assigned creation time; use
        // the fresh read rather than guessing at the store's clock.
        let created = self
            .list()?
            .into_iter()
            .find(|s| s.id == id)
            .ok_or_else(|| opencrm_core::StoreError::not_found(COLLECTION))?;
        Ok(created)
    }

    pub fn update(&self, sale: &Sale, draft: SaleDraft) -> Result<Sale, ServiceError> {
        draft.validate()?;

        self.store.update(COLLECTION, sale.id, draft.to_payload()?)?;

        self.audit.record(
            AuditCategory::Sale,
            AuditAction::Update,
            format!("Venta actualizada para {}", draft.customer),
        );

        Ok(Sale {
            id: sale.id,
            customer: draft.customer,
            amount_cents: draft.amount_cents,
            status: draft.status,
            created_at: sale.created_at,
        })
    }

    pub fn delete(&self, sale: &Sale) -> Result<(), ServiceError> {
        self.store.delete(COLLECTION, sale.id)?;

        self.audit.record(
            AuditCategory::Sale,
            AuditAction::Delete,
            format!("Venta eliminada para {}", sale.customer),
        );
        Ok(())
    }
}
