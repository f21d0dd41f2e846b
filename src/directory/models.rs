//! Directory models.

use std::fmt;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Access tier of a console account, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Day-to-day operator with no account administration rights.
    Staff,

    /// Account administrator.
    Admin,

    /// Platform-wide administrator.
    SuperAdmin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether this tier qualifies for the emergency recovery fallback.
    #[must_use]
    pub fn is_admin_tier(self) -> bool {
        self >= Self::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provisioned console account as it appears in the directory document.
///
/// Records are created by an external provisioning process and are read-only
/// here; the only mutation this crate performs is projecting a fresh
/// `last_login` into the session profile on successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub organization: String,

    #[serde(default)]
    pub last_login: Option<Timestamp>,
}

/// Role-to-capability grants, read-only for the lifetime of a loaded
/// [`Directory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionMatrix(FxHashMap<Role, FxHashMap<String, bool>>);

impl PermissionMatrix {
    #[must_use]
    pub fn new(grants: FxHashMap<Role, FxHashMap<String, bool>>) -> Self {
        Self(grants)
    }

    /// Capability row for a role. Roles absent from the matrix resolve to an
    /// empty row rather than an error; such sessions simply hold no grants.
    #[must_use]
    pub fn capabilities_for(&self, role: Role) -> FxHashMap<String, bool> {
        self.0.get(&role).cloned().unwrap_or_default()
    }

    /// Number of distinct capability names granted to `role`.
    #[must_use]
    pub fn granted_count(&self, role: Role) -> usize {
        self.0
            .get(&role)
            .map_or(0, |row| row.values().filter(|granted| **granted).count())
    }
}

/// A loaded snapshot of console accounts and their permission matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    pub users: Vec<UserRecord>,
    pub permissions: PermissionMatrix,
}

impl Directory {
    /// Look up an account by email. Emails are case-insensitively unique in
    /// the directory document, so the first match is the only match.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }
}
