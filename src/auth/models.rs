//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::directory::{Role, UserRecord};

/// The user-facing projection of a directory record plus the capability
/// snapshot resolved at login time.
///
/// Always written and read together with the session token as one logical
/// unit; the pair is never torn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionProfile {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub organization: String,
    pub last_login: Option<Timestamp>,

    /// Capability grants snapshotted from the permission matrix at login.
    /// Matrix changes after login take effect on the next login only.
    pub capabilities: FxHashMap<String, bool>,
}

impl SessionProfile {
    /// Project a directory record into a profile, stamping the login time.
    #[must_use]
    pub fn from_record(
        record: &UserRecord,
        capabilities: FxHashMap<String, bool>,
        last_login: Timestamp,
    ) -> Self {
        Self {
            user_id: record.id.clone(),
            username: record.username.clone(),
            email: record.email.clone(),
            role: record.role,
            organization: record.organization.clone(),
            last_login: Some(last_login),
            capabilities,
        }
    }

    /// Whether the snapshot grants `capability`.
    #[must_use]
    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.get(capability).copied().unwrap_or(false)
    }
}

/// Signal behind the persistent degraded-trust banner shown while a recovery
/// session is active, until the user completes a password reset.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryNotice {
    /// Email the recovery session was issued to.
    pub email: String,

    /// When the recovery session lapses.
    pub expires_at: Timestamp,
}

/// Login password input.
///
/// The wrapper keeps the raw text out of `Debug` output and zeroizes the
/// buffer on drop.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The trimmed input, or `None` when nothing but whitespace was entered.
    #[must_use]
    pub fn trimmed(&self) -> Option<&str> {
        let trimmed = self.0.trim();

        (!trimmed.is_empty()).then_some(trimmed)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2");

        assert_eq!(format!("{password:?}"), "Password(**redacted**)");
    }

    #[test]
    fn password_trims_whitespace() {
        assert_eq!(Password::new("  p  ").trimmed(), Some("p"));
        assert!(Password::new("   ").trimmed().is_none());
        assert!(Password::new("").trimmed().is_none());
    }

    #[test]
    fn profile_capability_lookup_defaults_to_denied() {
        let capabilities =
            FxHashMap::from_iter([("manage_users".to_string(), true), ("run_draws".to_string(), false)]);

        let profile = SessionProfile {
            user_id: "usr-001".to_string(),
            username: "dana".to_string(),
            email: "dana@example.com".to_string(),
            role: Role::Admin,
            organization: "Prize Ops".to_string(),
            last_login: None,
            capabilities,
        };

        assert!(profile.has_capability("manage_users"));
        assert!(!profile.has_capability("run_draws"), "explicit false denies");
        assert!(!profile.has_capability("unknown"), "absent denies");
    }
}
