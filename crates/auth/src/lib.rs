//! `opencrm-auth` — session resolution and authorization boundary.
//!
//! This crate owns the session triple `(identity, role, resolving)`, the
//! access-guard decisions that gate every protected view, and the account
//! flows around the external identity provider. It is intentionally
//! decoupled from rendering and storage: providers and profile stores are
//! contracts, guard decisions are plain values.

pub mod accounts;
pub mod directory;
pub mod guard;
pub mod identity;
pub mod permissions;
pub mod profile;
pub mod provider;
pub mod resolver;
pub mod roles;
pub mod session;

pub use accounts::AccountService;
pub use directory::UserDirectory;
pub use guard::{require_authenticated, require_role, GuardDecision, RedirectTarget};
pub use identity::Identity;
pub use permissions::{PermissionTable, View};
pub use profile::{ProfileStore, ProfileStoreError, UserProfile};
pub use provider::{AuthError, AuthListener, AuthProvider, ListenerId};
pub use resolver::{LookupToken, RoleLookup, SessionBinding, SessionResolver};
pub use roles::Role;
pub use session::{SessionSnapshot, SessionSubscription};
