//! Auth service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    auth::{AuthError, Password, SessionProfile},
    directory::{DirectoryProvider, UserRecord},
    session::{SessionClaims, SessionStore, format_session_token},
};

/// Lifetime of a normal session.
pub const SESSION_TTL: SignedDuration = SignedDuration::from_hours(24);

/// Lifetime of a degraded-trust recovery session, kept short to bound
/// exposure.
pub const RECOVERY_TTL: SignedDuration = SignedDuration::from_hours(1);

/// Authenticator backed by an injected directory provider and session store.
#[derive(Clone)]
pub struct DirectoryAuthService {
    directory: Arc<dyn DirectoryProvider>,
    store: Arc<SessionStore>,
}

impl fmt::Debug for DirectoryAuthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DirectoryAuthService")
    }
}

impl DirectoryAuthService {
    #[must_use]
    pub fn new(directory: Arc<dyn DirectoryProvider>, store: Arc<SessionStore>) -> Self {
        Self { directory, store }
    }
}

#[async_trait]
impl AuthService for DirectoryAuthService {
    #[tracing::instrument(name = "auth.service.login", skip(self, password, now))]
    async fn login(
        &self,
        email: &str,
        password: &Password,
        now: Timestamp,
    ) -> Result<SessionProfile, AuthError> {
        let email = email.trim();

        if email.is_empty() || password.trimmed().is_none() {
            return Err(AuthError::InvalidInput);
        }

        let directory = self.directory.load().await?;

        let record = directory
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !record.is_active {
            return Err(AuthError::AccountInactive);
        }

        // The directory document carries no secret material, so there is
        // nothing to check the password against; any non-empty value passes.
        // TODO: verify against a credential store once the directory carries
        // password hashes.

        let capabilities = directory.permissions.capabilities_for(record.role);
        let profile = SessionProfile::from_record(record, capabilities, now);
        let claims = issue_claims(record, now, SESSION_TTL, false)?;
        let token = format_session_token(&claims)?;

        self.store.save(&token, &profile)?;

        info!(
            user_id = %profile.user_id,
            role = %profile.role,
            session_uuid = %claims.session_uuid,
            "session issued"
        );

        Ok(profile)
    }

    #[tracing::instrument(name = "auth.service.recover", skip(self, now))]
    async fn recover(&self, email: &str, now: Timestamp) -> Result<SessionProfile, AuthError> {
        let email = email.trim();

        let directory = self.directory.load().await?;

        let record = directory
            .find_by_email(email)
            .ok_or(AuthError::NotEligible)?;

        // The lowest tier is excluded. The active flag is deliberately not
        // consulted: recovery exists for operators locked out of the normal
        // path.
        if !record.role.is_admin_tier() {
            return Err(AuthError::NotEligible);
        }

        let capabilities = directory.permissions.capabilities_for(record.role);
        let profile = SessionProfile::from_record(record, capabilities, now);
        let claims = issue_claims(record, now, RECOVERY_TTL, true)?;
        let token = format_session_token(&claims)?;

        self.store.save_recovery(&token, &profile, &record.email)?;

        warn!(
            user_id = %profile.user_id,
            session_uuid = %claims.session_uuid,
            "degraded-trust recovery session issued"
        );

        Ok(profile)
    }

    fn logout(&self) -> Result<(), AuthError> {
        self.store.clear().map_err(AuthError::from)
    }
}

fn issue_claims(
    record: &UserRecord,
    now: Timestamp,
    ttl: SignedDuration,
    recovery: bool,
) -> Result<SessionClaims, AuthError> {
    let expires_at = now.checked_add(ttl).map_err(AuthError::Expiry)?;

    Ok(SessionClaims {
        session_uuid: Uuid::now_v7(),
        user_id: record.id.clone(),
        email: record.email.clone(),
        role: record.role,
        expires_at,
        recovery,
    })
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Validate credentials against the directory and issue a session.
    ///
    /// # Errors
    ///
    /// Returns an error for empty input, an unknown email, a deactivated
    /// account, or when the directory or session storage is unavailable.
    async fn login(
        &self,
        email: &str,
        password: &Password,
        now: Timestamp,
    ) -> Result<SessionProfile, AuthError>;

    /// Emergency fallback, invoked only after `login` fails: issue a
    /// short-lived degraded-trust session for an admin-tier account.
    ///
    /// # Errors
    ///
    /// Returns an error when the email matches no admin-tier account, or
    /// when the directory or session storage is unavailable.
    async fn recover(&self, email: &str, now: Timestamp) -> Result<SessionProfile, AuthError>;

    /// Destroy the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the session storage cannot be written.
    fn logout(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use crate::{
        directory::MockDirectoryProvider,
        session::MemoryStorage,
        test::{TestContext, fixtures},
    };

    use super::*;

    fn plus(base: Timestamp, duration: SignedDuration) -> Timestamp {
        base.checked_add(duration).expect("timestamp in range")
    }

    #[tokio::test]
    async fn login_loads_the_directory_fresh_on_every_call() -> TestResult {
        let mut provider = MockDirectoryProvider::new();

        provider
            .expect_load()
            .times(2)
            .returning(|| Ok(fixtures::sample_directory()));

        let store = Arc::new(SessionStore::new(MemoryStorage::new()));
        let auth = DirectoryAuthService::new(Arc::new(provider), Arc::clone(&store));
        let now = Timestamp::UNIX_EPOCH;

        auth.login("dana@example.com", &Password::new("p"), now)
            .await?;
        auth.login("dana@example.com", &Password::new("p"), now)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn login_succeeds_for_active_account_with_any_password() -> TestResult {
        let ctx = TestContext::new();

        let profile = ctx
            .auth
            .login("dana@example.com", &Password::new("anything-at-all"), ctx.now)
            .await?;

        assert_eq!(profile.role, crate::directory::Role::Admin);
        assert_eq!(profile.organization, "Prize Ops");
        assert_eq!(profile.last_login, Some(ctx.now));
        assert!(ctx.store.is_valid(ctx.now));

        Ok(())
    }

    #[tokio::test]
    async fn login_is_case_insensitive_on_email() -> TestResult {
        let ctx = TestContext::new();

        let profile = ctx
            .auth
            .login("DANA@EXAMPLE.COM", &Password::new("p"), ctx.now)
            .await?;

        assert_eq!(profile.email, "dana@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_empty_input() {
        let ctx = TestContext::new();

        for (email, password) in [("", "p"), ("dana@example.com", ""), ("  ", "   ")] {
            let result = ctx
                .auth
                .login(email, &Password::new(password), ctx.now)
                .await;

            assert!(
                matches!(result, Err(AuthError::InvalidInput)),
                "expected InvalidInput for {email:?}/{password:?}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn login_rejects_unknown_email() {
        let ctx = TestContext::new();

        let result = ctx
            .auth
            .login("unknown@x.com", &Password::new("p"), ctx.now)
            .await;

        assert!(
            matches!(result, Err(AuthError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );
        assert!(!ctx.store.is_valid(ctx.now), "no session should be issued");
    }

    #[tokio::test]
    async fn login_rejects_inactive_account() {
        let ctx = TestContext::new();

        let result = ctx
            .auth
            .login("ivan@example.com", &Password::new("p"), ctx.now)
            .await;

        assert!(
            matches!(result, Err(AuthError::AccountInactive)),
            "expected AccountInactive, got {result:?}"
        );
    }

    #[tokio::test]
    async fn login_session_expires_after_a_day() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .login("dana@example.com", &Password::new("p"), ctx.now)
            .await?;

        let expiry = plus(ctx.now, SESSION_TTL);

        assert!(ctx.store.is_valid(plus(expiry, SignedDuration::from_millis(-1))));
        assert!(!ctx.store.is_valid(plus(expiry, SignedDuration::from_millis(1))));
        assert!(
            ctx.store.read_token().is_none(),
            "expired session should be evicted"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_surfaces_directory_failure() {
        let ctx = TestContext::with_unavailable_directory();

        let result = ctx
            .auth
            .login("dana@example.com", &Password::new("p"), ctx.now)
            .await;

        assert!(
            matches!(result, Err(AuthError::DirectoryUnavailable(_))),
            "expected DirectoryUnavailable, got {result:?}"
        );
    }

    #[tokio::test]
    async fn recover_rejects_staff_and_unknown_accounts() {
        let ctx = TestContext::new();

        for email in ["sam@example.com", "unknown@x.com"] {
            let result = ctx.auth.recover(email, ctx.now).await;

            assert!(
                matches!(result, Err(AuthError::NotEligible)),
                "expected NotEligible for {email}, got {result:?}"
            );
        }
    }

    #[tokio::test]
    async fn recover_accepts_admin_tier_even_when_inactive() -> TestResult {
        let ctx = TestContext::new();

        // Inactive admin: the fallback does not consult the active flag.
        let profile = ctx.auth.recover("ivan@example.com", ctx.now).await?;

        assert_eq!(profile.user_id, "usr-003");

        let claims = ctx.store.read_token().expect("token should be stored");

        assert!(claims.recovery, "claims should carry the recovery flag");

        Ok(())
    }

    #[tokio::test]
    async fn recovery_session_is_short_lived() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth.recover("priya@example.com", ctx.now).await?;

        let expiry = plus(ctx.now, RECOVERY_TTL);

        assert!(ctx.store.is_valid(plus(expiry, SignedDuration::from_millis(-1))));
        assert!(!ctx.store.is_valid(plus(expiry, SignedDuration::from_millis(1))));
        assert!(
            RECOVERY_TTL < SESSION_TTL,
            "recovery sessions must be strictly shorter than normal ones"
        );

        Ok(())
    }

    #[tokio::test]
    async fn recover_surfaces_degraded_trust_notice() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth.recover("priya@example.com", ctx.now).await?;

        let notice = ctx
            .store
            .recovery_notice(ctx.now)
            .expect("notice should be present");

        assert_eq!(notice.email, "priya@example.com");
        assert_eq!(notice.expires_at, plus(ctx.now, RECOVERY_TTL));

        Ok(())
    }

    #[tokio::test]
    async fn fresh_login_ends_recovery_mode() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth.recover("priya@example.com", ctx.now).await?;
        ctx.auth
            .login("priya@example.com", &Password::new("p"), ctx.now)
            .await?;

        assert!(
            ctx.store.recovery_notice(ctx.now).is_none(),
            "a fresh normal login is the only way out of recovery mode"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_clears_the_session() -> TestResult {
        let ctx = TestContext::new();

        ctx.auth
            .login("dana@example.com", &Password::new("p"), ctx.now)
            .await?;
        ctx.auth.logout()?;

        assert!(!ctx.store.is_valid(ctx.now));
        assert!(ctx.store.read_profile().is_none());

        Ok(())
    }
}
