//! `opencrm-infra` — in-memory implementations of the external-collaborator
//! contracts.
//!
//! Everything here is test/dev-grade: good enough to wire the whole
//! application together without the hosted services, not optimized for
//! production load.

pub mod audit_store;
pub mod auth_provider;
pub mod document_store;
pub mod mailer;
pub mod profile_store;


pub use audit_store::InMemoryAuditStore;
pub use auth_provider::InMemoryAuthProvider;
pub use document_store::InMemoryDocumentStore;
pub use mailer::RecordingMailer;
pub use profile_store::InMemoryProfileStore;
