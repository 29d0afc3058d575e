//! Access-level roles.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role governing which views a user may reach.
///
/// The set is closed on purpose: profiles sourced from the user store carry
/// one of these lowercase tags, and anything else resolves to "no role"
/// rather than an error. Fail-closed: an unrecognized role never grants
/// access, and there is no wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Vendedor,
    Soporte,
    Marketing,
}

impl Role {
    /// Every role, for administration views that enumerate the choices.
    pub const ALL: [Role; 4] = [Role::Admin, Role::Vendedor, Role::Soporte, Role::Marketing];

    /// Parse a profile's role tag; unknown tags are "no role", not errors.
    pub fn parse(tag: &str) -> Option<Role> {
        match tag {
            "admin" => Some(Role::Admin),
            "vendedor" => Some(Role::Vendedor),
            "soporte" => Some(Role::Soporte),
            "marketing" => Some(Role::Marketing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Vendedor => "vendedor",
            Role::Soporte => "soporte",
            Role::Marketing => "marketing",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `FromStr` exists for callers that want the strict form; prefer
/// [`Role::parse`] when "unknown" should degrade to no role.
impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or(())
    }
}
