//! Paired session state storage.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use tracing::warn;

use crate::{
    auth::{RecoveryNotice, SessionProfile},
    session::{
        SessionClaims, SessionStorage, StorageError, parse_session_token,
    },
};

/// Storage slot for the normal session token.
const TOKEN_KEY: &str = "tombola.session.token";

/// Storage slot for the session profile, shared by normal and recovery
/// sessions.
const PROFILE_KEY: &str = "tombola.session.profile";

/// Storage slot for the degraded-trust recovery token. Distinct from the
/// normal slot so the two session kinds are distinguishable at rest.
const RECOVERY_TOKEN_KEY: &str = "tombola.recovery.token";

/// Storage slot for the email a recovery session was issued to.
const RECOVERY_EMAIL_KEY: &str = "tombola.recovery.email";

/// Exclusive owner of the durable session slots.
///
/// Every other component reaches session state through the authenticator and
/// permission gate accessors; nothing else touches the backing storage. The
/// backend sits behind a lock so the paired token/profile write cannot
/// interleave with a concurrent read or clear.
pub struct SessionStore {
    storage: Mutex<Box<dyn SessionStorage>>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionStore")
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Mutex::new(Box::new(storage)),
        }
    }

    /// Persist a normal session as one logical unit.
    ///
    /// Replaces any recovery session. If the profile write fails, the token
    /// write is rolled back so the pair is never torn.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    pub fn save(&self, token: &str, profile: &SessionProfile) -> Result<(), StorageError> {
        let profile_json =
            serde_json::to_string(profile).map_err(StorageError::Serialize)?;

        let mut storage = self.lock();

        storage.remove(RECOVERY_TOKEN_KEY)?;
        storage.remove(RECOVERY_EMAIL_KEY)?;

        storage.set(TOKEN_KEY, token)?;

        if let Err(error) = storage.set(PROFILE_KEY, &profile_json) {
            let _rollback = storage.remove(TOKEN_KEY);

            return Err(error);
        }

        Ok(())
    }

    /// Persist a degraded-trust recovery session under the distinct slots.
    ///
    /// Replaces any normal session.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    pub fn save_recovery(
        &self,
        token: &str,
        profile: &SessionProfile,
        email: &str,
    ) -> Result<(), StorageError> {
        let profile_json =
            serde_json::to_string(profile).map_err(StorageError::Serialize)?;

        let mut storage = self.lock();

        storage.remove(TOKEN_KEY)?;

        storage.set(RECOVERY_TOKEN_KEY, token)?;

        if let Err(error) = storage.set(PROFILE_KEY, &profile_json) {
            let _rollback = storage.remove(RECOVERY_TOKEN_KEY);

            return Err(error);
        }

        if let Err(error) = storage.set(RECOVERY_EMAIL_KEY, email) {
            let _rollback = storage.remove(RECOVERY_TOKEN_KEY);
            let _rollback = storage.remove(PROFILE_KEY);

            return Err(error);
        }

        Ok(())
    }

    /// Decode the stored token, preferring the normal slot.
    ///
    /// Fails soft: malformed slot data is cleared and reads as absent.
    #[must_use]
    pub fn read_token(&self) -> Option<SessionClaims> {
        let mut storage = self.lock();

        Self::read_token_slot(&mut storage, TOKEN_KEY)
            .or_else(|| Self::read_token_slot(&mut storage, RECOVERY_TOKEN_KEY))
    }

    /// Decode the stored profile, failing soft on malformed data.
    #[must_use]
    pub fn read_profile(&self) -> Option<SessionProfile> {
        let mut storage = self.lock();

        let raw = storage.get(PROFILE_KEY)?;

        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(error) => {
                warn!("clearing malformed session profile slot: {error}");

                let _cleared = storage.remove(PROFILE_KEY);

                None
            }
        }
    }

    /// Whether a live session exists at `now`.
    ///
    /// Expiry is evicted lazily: a validity check past the expiry clears
    /// every slot as a side effect. There is no background sweep.
    #[must_use]
    pub fn is_valid(&self, now: Timestamp) -> bool {
        match self.read_token() {
            Some(claims) if claims.is_live(now) => true,
            Some(_expired) => {
                // Eviction is best effort; the session is invalid either way.
                if let Err(error) = self.clear() {
                    warn!("failed to evict expired session: {error}");
                }

                false
            }
            None => false,
        }
    }

    /// The degraded-trust banner signal: present while a live recovery
    /// session exists.
    #[must_use]
    pub fn recovery_notice(&self, now: Timestamp) -> Option<RecoveryNotice> {
        let claims = {
            let mut storage = self.lock();

            Self::read_token_slot(&mut storage, RECOVERY_TOKEN_KEY)
        }?;

        if !claims.recovery || !claims.is_live(now) {
            return None;
        }

        let email = self
            .lock()
            .get(RECOVERY_EMAIL_KEY)
            .unwrap_or_else(|| claims.email.clone());

        Some(RecoveryNotice {
            email,
            expires_at: claims.expires_at,
        })
    }

    /// Remove every session slot unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut storage = self.lock();

        for key in [TOKEN_KEY, PROFILE_KEY, RECOVERY_TOKEN_KEY, RECOVERY_EMAIL_KEY] {
            storage.remove(key)?;
        }

        Ok(())
    }

    fn read_token_slot(
        storage: &mut MutexGuard<'_, Box<dyn SessionStorage>>,
        key: &str,
    ) -> Option<SessionClaims> {
        let raw = storage.get(key)?;

        match parse_session_token(&raw) {
            Ok(claims) => Some(claims),
            Err(error) => {
                warn!("clearing malformed session token slot: {error}");

                let _cleared = storage.remove(key);

                None
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn SessionStorage>> {
        // A panicked holder cannot leave a slot half-written (each write is a
        // single insert), so the poisoned guard is safe to recover.
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
