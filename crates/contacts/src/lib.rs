//! `opencrm-contacts` — contact book with comments and follow-up tasks.

pub mod contact;
pub mod service;

pub use contact::{Comment, Contact, ContactDraft, ContactFilter, TaskItem, COLLECTION};
pub use service::ContactService;
