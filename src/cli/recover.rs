//! Emergency recovery command.

use clap::Args;
use jiff::Timestamp;

use crate::{
    auth::{AuthError, AuthService as _},
    config::{DirectoryConfig, SessionConfig},
    context::AppContext,
};

/// Issue a degraded-trust recovery session for an admin-tier account.
///
/// Only useful after a normal login has failed.
#[derive(Debug, Args)]
pub(crate) struct RecoverArgs {
    /// Account email
    #[arg(long)]
    email: String,

    #[command(flatten)]
    directory: DirectoryConfig,

    #[command(flatten)]
    session: SessionConfig,
}

pub(crate) async fn run(args: RecoverArgs) -> Result<(), String> {
    let app = AppContext::from_config(&args.directory.source, args.session.session_file);
    let now = Timestamp::now();

    let profile = app
        .auth
        .recover(&args.email, now)
        .await
        .map_err(|error| match error {
            // Declines with the same message as a failed login, so account
            // existence cannot be probed through the fallback either.
            AuthError::NotEligible => "invalid email or password".to_string(),
            other => format!("recovery failed: {other}"),
        })?;

    println!("recovery session issued for {}", profile.email);

    if let Some(notice) = app.store.recovery_notice(now) {
        println!(
            "DEGRADED TRUST: complete a password reset before {}",
            notice.expires_at
        );
    }

    Ok(())
}
