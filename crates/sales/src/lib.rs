//! `opencrm-sales` — sales records and their list-view queries.

pub mod sale;
pub mod service;

pub use sale::{AmountOrder, Sale, SaleDraft, SaleFilter, SaleStatus, COLLECTION};
pub use service::SalesService;
