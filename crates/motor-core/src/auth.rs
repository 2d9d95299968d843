//! # Authorization Gate
//!
//! Decides whether a caller may perform an operation, given the role
//! indicator that came with the request.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  role indicator          required = Admin                               │
//! │  ───────────────         ──────────────────────────────────────         │
//! │  absent                  Deny(MissingRole)                              │
//! │  "user"                  Deny(AdminRequired)                            │
//! │  "superuser" (unknown)   Deny(AdminRequired)                            │
//! │  "admin"                 Allow(Admin)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The indicator is a plain label, not a credential. The gate is pure and
//! knows nothing about headers; the HTTP layer decides where the label
//! comes from.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// The closed set of caller roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create, update and delete products.
    Admin,
    /// Read-only caller.
    User,
}

impl Role {
    /// Every role, in descending order of privilege.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// The wire label of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parses an exact, lowercase role label. Anything else is unknown.
    pub fn parse(label: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|role| role.as_str() == label)
    }

    /// Whether this role carries every capability of `required`.
    pub const fn grants(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::User, Role::User) => true,
            (Role::User, Role::Admin) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Access Denied
// =============================================================================

/// Why the gate rejected a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    /// No role indicator at all.
    #[error("Role indicator is missing")]
    MissingRole,

    /// A role was given but it does not carry admin capabilities.
    #[error("Admin role required")]
    AdminRequired,

    /// A role was given but it does not carry user capabilities.
    #[error("User role required")]
    UserRequired,
}

impl AccessDenied {
    fn for_required(required: Role) -> Self {
        match required {
            Role::Admin => AccessDenied::AdminRequired,
            Role::User => AccessDenied::UserRequired,
        }
    }
}

// =============================================================================
// Gate
// =============================================================================

/// Checks a caller's role indicator against the role an operation requires.
///
/// ## Returns
/// * `Ok(role)` - the caller's parsed role, which grants `required`
/// * `Err(AccessDenied::MissingRole)` - no indicator
/// * `Err(AccessDenied::AdminRequired)` - indicator present but insufficient
///   or unknown, for an admin-only operation
///
/// ## Example
/// ```rust
/// use motor_core::auth::{authorize, AccessDenied, Role};
///
/// assert_eq!(authorize(Some("admin"), Role::Admin), Ok(Role::Admin));
/// assert_eq!(authorize(Some("user"), Role::Admin), Err(AccessDenied::AdminRequired));
/// assert_eq!(authorize(None, Role::Admin), Err(AccessDenied::MissingRole));
/// ```
pub fn authorize(role: Option<&str>, required: Role) -> Result<Role, AccessDenied> {
    let label = role.ok_or(AccessDenied::MissingRole)?;

    match Role::parse(label) {
        Some(role) if role.grants(required) => Ok(role),
        _ => Err(AccessDenied::for_required(required)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_passes_admin_gate() {
        assert_eq!(authorize(Some("admin"), Role::Admin), Ok(Role::Admin));
    }

    #[test]
    fn test_missing_role_is_rejected() {
        let denied = authorize(None, Role::Admin).unwrap_err();
        assert_eq!(denied, AccessDenied::MissingRole);
        assert!(denied.to_string().contains("missing"));
    }

    #[test]
    fn test_user_role_needs_admin() {
        let denied = authorize(Some("user"), Role::Admin).unwrap_err();
        assert_eq!(denied, AccessDenied::AdminRequired);
        assert_eq!(denied.to_string(), "Admin role required");
    }

    #[test]
    fn test_unknown_or_miscased_roles_are_not_admin() {
        for label in ["", "Admin", "ADMIN", " admin", "root"] {
            assert_eq!(
                authorize(Some(label), Role::Admin),
                Err(AccessDenied::AdminRequired),
                "label {:?}",
                label
            );
        }
    }

    #[test]
    fn test_admin_grants_user_capabilities() {
        assert_eq!(authorize(Some("admin"), Role::User), Ok(Role::Admin));
        assert_eq!(authorize(Some("user"), Role::User), Ok(Role::User));
        assert_eq!(
            authorize(Some("guest"), Role::User),
            Err(AccessDenied::UserRequired)
        );
    }

    #[test]
    fn test_role_labels_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
