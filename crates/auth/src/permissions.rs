//! Centralized view-permission table.
//!
//! One declarative mapping from view to allowed roles, consulted by every
//! route guard. Keeping the lists here (instead of inline at each call
//! site) means duplicate route declarations cannot drift apart.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::guard::{require_authenticated, require_role, GuardDecision};
use crate::roles::Role;
use crate::session::SessionSnapshot;

/// Identifier of a navigable view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Dashboard,
    Contacts,
    Sales,
    Support,
    Marketing,
    Analytics,
    Users,
    History,
}

impl View {
    pub const ALL: [View; 8] = [
        View::Dashboard,
        View::Contacts,
        View::Sales,
        View::Support,
        View::Marketing,
        View::Analytics,
        View::Users,
        View::History,
    ];
}

/// Declarative mapping from view to allowed-role set.
///
/// A view with no entry is accessible to any authenticated identity. A view
/// with an entry is accessible only to members of its set; an empty set
/// denies everyone.
#[derive(Debug, Clone, Default)]
pub struct PermissionTable {
    rules: HashMap<View, Vec<Role>>,
}

impl PermissionTable {
    /// Empty table: every view requires authentication only.
    pub fn new() -> Self {
        Self::default()
    }

    /// The application's standard table.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.declare(View::Sales, [Role::Admin, Role::Vendedor]);
        table.declare(View::Support, [Role::Admin, Role::Soporte]);
        table.declare(View::Marketing, [Role::Admin]);
        table.declare(View::Analytics, [Role::Admin]);
        table.declare(View::Users, [Role::Admin]);
        table
    }

    /// Declare (or replace) a view's allowed-role set.
    pub fn declare(&mut self, view: View, allowed: impl Into<Vec<Role>>) {
        self.rules.insert(view, allowed.into());
    }

    /// The declared set, if any.
    pub fn allowed_roles(&self, view: View) -> Option<&[Role]> {
        self.rules.get(&view).map(Vec::as_slice)
    }

    /// Authorize a session against a view, composing the authentication and
    /// role guards in that order.
    pub fn decide(&self, session: &SessionSnapshot, view: View) -> GuardDecision {
        match self.allowed_roles(view) {
            None => require_authenticated(session),
            Some(allowed) => require_role(session, allowed),
        }
    }

    /// Views a session may navigate to (drives menu rendering).
    pub fn navigable_views(&self, session: &SessionSnapshot) -> Vec<View> {
        View::ALL
            .into_iter()
            .filter(|view| self.decide(session, *view).is_grant())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use opencrm_core::IdentityId;

    use crate::guard::RedirectTarget;
    use crate::identity::Identity;

    use super::*;

    fn session(role: Option<Role>) -> SessionSnapshot {
        SessionSnapshot::settled(Identity::new(IdentityId::new(), "u@example.com"), role)
    }

    #[test]
    fn standard_table_matches_the_route_tree() {
        let table = PermissionTable::standard();

        assert_eq!(table.allowed_roles(View::Dashboard), None);
        assert_eq!(table.allowed_roles(View::Contacts), None);
        assert_eq!(table.allowed_roles(View::History), None);
        assert_eq!(
            table.allowed_roles(View::Sales),
            Some([Role::Admin, Role::Vendedor].as_slice())
        );
        assert_eq!(
            table.allowed_roles(View::Support),
            Some([Role::Admin, Role::Soporte].as_slice())
        );
        assert_eq!(table.allowed_roles(View::Marketing), Some([Role::Admin].as_slice()));
        assert_eq!(table.allowed_roles(View::Analytics), Some([Role::Admin].as_slice()));
        assert_eq!(table.allowed_roles(View::Users), Some([Role::Admin].as_slice()));
    }

    #[test]
    fn undeclared_views_need_authentication_only() {
        let table = PermissionTable::standard();

        assert!(table.decide(&session(None), View::Contacts).is_grant());
        assert_eq!(
            table.decide(&SessionSnapshot::signed_out(), View::Contacts),
            GuardDecision::Redirect(RedirectTarget::SignIn)
        );
    }

    #[test]
    fn vendedor_sees_sales_but_not_users() {
        let table = PermissionTable::standard();
        let vendedor = session(Some(Role::Vendedor));

        assert!(table.decide(&vendedor, View::Sales).is_grant());
        assert_eq!(
            table.decide(&vendedor, View::Users),
            GuardDecision::Redirect(RedirectTarget::Landing)
        );
    }

    #[test]
    fn navigable_views_reflect_the_role() {
        let table = PermissionTable::standard();

        let soporte = table.navigable_views(&session(Some(Role::Soporte)));
        assert_eq!(
            soporte,
            vec![View::Dashboard, View::Contacts, View::Support, View::History]
        );

        let admin = table.navigable_views(&session(Some(Role::Admin)));
        assert_eq!(admin.len(), View::ALL.len());
    }

    #[test]
    fn declared_empty_set_denies_every_role() {
        let mut table = PermissionTable::new();
        table.declare(View::Marketing, []);

        assert_eq!(
            table.decide(&session(Some(Role::Admin)), View::Marketing),
            GuardDecision::Redirect(RedirectTarget::Landing)
        );
    }
}
