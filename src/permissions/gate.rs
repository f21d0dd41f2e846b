//! Permission gate.

use std::{fmt, sync::Arc};

use jiff::Timestamp;

use crate::session::SessionStore;

/// Advisory capability checks against the login-time snapshot.
///
/// Answers drive conditional rendering of console affordances only; this is
/// not a security boundary, as nothing enforces the grants server-side.
#[derive(Clone)]
pub struct PermissionGate {
    store: Arc<SessionStore>,
}

impl fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PermissionGate")
    }
}

impl PermissionGate {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Whether the current session grants `capability`.
    ///
    /// False without a live session. The answer comes from the snapshot
    /// taken at login; permission matrix changes after login take effect on
    /// the next login only.
    #[must_use]
    pub fn has(&self, capability: &str, now: Timestamp) -> bool {
        if !self.store.is_valid(now) {
            return false;
        }

        self.store
            .read_profile()
            .is_some_and(|profile| profile.has_capability(capability))
    }
}
