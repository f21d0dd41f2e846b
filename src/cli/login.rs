//! Login command.

use clap::Args;
use jiff::Timestamp;

use crate::{
    auth::{AuthError, AuthService as _, Password},
    config::{DirectoryConfig, SessionConfig},
    context::AppContext,
};

/// Authenticate against the directory and persist a session.
#[derive(Debug, Args)]
pub(crate) struct LoginArgs {
    /// Account email
    #[arg(long)]
    email: String,

    /// Account password
    #[arg(long)]
    password: String,

    #[command(flatten)]
    directory: DirectoryConfig,

    #[command(flatten)]
    session: SessionConfig,
}

pub(crate) async fn run(args: LoginArgs) -> Result<(), String> {
    let app = AppContext::from_config(&args.directory.source, args.session.session_file);

    let profile = app
        .auth
        .login(&args.email, &Password::new(args.password), Timestamp::now())
        .await
        .map_err(|error| match error {
            // One message for both, so account existence cannot be probed.
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                "invalid email or password".to_string()
            }
            other => format!("login failed: {other}"),
        })?;

    let mut granted: Vec<&str> = profile
        .capabilities
        .iter()
        .filter(|(_, granted)| **granted)
        .map(|(name, _)| name.as_str())
        .collect();

    granted.sort_unstable();

    println!("signed in: {} <{}>", profile.username, profile.email);
    println!("role: {}", profile.role);
    println!("organization: {}", profile.organization);
    println!("capabilities: {}", granted.join(", "));

    Ok(())
}
