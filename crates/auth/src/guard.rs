//! Access-guard decisions.
//!
//! Pure policy checks over a session snapshot:
//!
//! - No IO
//! - No panics
//! - No side effects (the guard never signs anyone out or mutates state;
//!   it only tells the caller what to render)

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::session::SessionSnapshot;

/// Where a denied request should be sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedirectTarget {
    /// The unauthenticated entry point (sign-in view).
    SignIn,
    /// The default authenticated landing view (dashboard).
    Landing,
}

impl RedirectTarget {
    /// Navigation path for the target.
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::SignIn => "/",
            RedirectTarget::Landing => "/dashboard",
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardDecision {
    /// Session resolution is still pending: show the loading placeholder and
    /// defer the decision.
    Pending,
    /// Render the protected content.
    Grant,
    /// Authorization denial is never an error; it is a redirect.
    Redirect(RedirectTarget),
}

impl GuardDecision {
    pub fn is_grant(&self) -> bool {
        matches!(self, GuardDecision::Grant)
    }
}

/// Authentication guard: requires a present identity.
pub fn require_authenticated(session: &SessionSnapshot) -> GuardDecision {
    if session.resolving {
        return GuardDecision::Pending;
    }

    if session.is_authenticated() {
        GuardDecision::Grant
    } else {
        GuardDecision::Redirect(RedirectTarget::SignIn)
    }
}

/// Role guard, composed over the authentication guard in that order.
///
/// An empty `allowed` set denies every role: the defensive default is deny,
/// never allow.
pub fn require_role(session: &SessionSnapshot, allowed: &[Role]) -> GuardDecision {
    match require_authenticated(session) {
        GuardDecision::Grant => {}
        other => return other,
    }

    match session.role {
        Some(role) if allowed.contains(&role) => GuardDecision::Grant,
        _ => GuardDecision::Redirect(RedirectTarget::Landing),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use opencrm_core::IdentityId;

    use crate::identity::Identity;

    use super::*;

    fn session(role: Option<Role>) -> SessionSnapshot {
        SessionSnapshot::settled(Identity::new(IdentityId::new(), "u@example.com"), role)
    }

    #[test]
    fn resolving_always_defers_regardless_of_identity_and_role() {
        let mut resolving = session(Some(Role::Admin));
        resolving.resolving = true;

        assert_eq!(require_authenticated(&resolving), GuardDecision::Pending);
        assert_eq!(require_role(&resolving, &[Role::Admin]), GuardDecision::Pending);
        assert_eq!(require_authenticated(&SessionSnapshot::initial()), GuardDecision::Pending);
    }

    #[test]
    fn absent_identity_redirects_to_sign_in() {
        let signed_out = SessionSnapshot::signed_out();

        assert_eq!(
            require_authenticated(&signed_out),
            GuardDecision::Redirect(RedirectTarget::SignIn)
        );
        assert_eq!(
            require_role(&signed_out, &[Role::Admin]),
            GuardDecision::Redirect(RedirectTarget::SignIn)
        );
    }

    #[test]
    fn vendedor_reaches_a_view_shared_with_admin() {
        let decision = require_role(&session(Some(Role::Vendedor)), &[Role::Admin, Role::Vendedor]);
        assert_eq!(decision, GuardDecision::Grant);
    }

    #[test]
    fn vendedor_is_redirected_to_landing_from_an_admin_view() {
        let decision = require_role(&session(Some(Role::Vendedor)), &[Role::Admin]);
        assert_eq!(decision, GuardDecision::Redirect(RedirectTarget::Landing));
        assert_eq!(RedirectTarget::Landing.path(), "/dashboard");
    }

    #[test]
    fn empty_allowed_set_denies_even_admin() {
        let decision = require_role(&session(Some(Role::Admin)), &[]);
        assert_eq!(decision, GuardDecision::Redirect(RedirectTarget::Landing));
    }

    #[test]
    fn no_role_is_denied_from_role_gated_views() {
        let decision = require_role(&session(None), &[Role::Admin, Role::Vendedor]);
        assert_eq!(decision, GuardDecision::Redirect(RedirectTarget::Landing));
    }

    fn arb_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: content renders iff identity is present and the role is
        /// a member of a non-empty allowed set; otherwise the guard
        /// redirects (or defers while resolving).
        #[test]
        fn grant_iff_member_of_nonempty_allowed_set(
            role in proptest::option::of(arb_role()),
            allowed in prop::collection::vec(arb_role(), 0..4),
        ) {
            let decision = require_role(&session(role), &allowed);

            let expected_grant =
                !allowed.is_empty() && role.is_some_and(|r| allowed.contains(&r));

            if expected_grant {
                prop_assert_eq!(decision, GuardDecision::Grant);
            } else {
                prop_assert_eq!(decision, GuardDecision::Redirect(RedirectTarget::Landing));
            }
        }
    }
}
