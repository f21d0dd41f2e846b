//! Session inspection commands.

use clap::{Args, Subcommand};
use jiff::Timestamp;

use crate::{
    config::SessionConfig,
    session::{FileStorage, SessionStore},
};

#[derive(Debug, Args)]
pub(crate) struct SessionCommand {
    #[command(subcommand)]
    command: SessionSubcommand,
}

#[derive(Debug, Subcommand)]
enum SessionSubcommand {
    /// Print the current session, if one is live.
    Show(ShowArgs),

    /// Log out: remove every session slot.
    Clear(ClearArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    session: SessionConfig,
}

#[derive(Debug, Args)]
struct ClearArgs {
    #[command(flatten)]
    session: SessionConfig,
}

pub(crate) fn run(command: SessionCommand) -> Result<(), String> {
    match command.command {
        SessionSubcommand::Show(args) => show(&args),
        SessionSubcommand::Clear(args) => clear(&args),
    }
}

fn show(args: &ShowArgs) -> Result<(), String> {
    let store = SessionStore::new(FileStorage::open(&args.session.session_file));
    let now = Timestamp::now();

    if !store.is_valid(now) {
        println!("no active session");

        return Ok(());
    }

    let Some(claims) = store.read_token() else {
        println!("no active session");

        return Ok(());
    };

    println!("session: {}", claims.session_uuid);
    println!("user: {} ({})", claims.email, claims.role);
    println!("expires: {}", claims.expires_at);

    if let Some(notice) = store.recovery_notice(now) {
        println!(
            "DEGRADED TRUST: recovery session for {}; complete a password reset",
            notice.email
        );
    }

    Ok(())
}

fn clear(args: &ClearArgs) -> Result<(), String> {
    let store = SessionStore::new(FileStorage::open(&args.session.session_file));

    store
        .clear()
        .map_err(|error| format!("failed to clear session: {error}"))?;

    println!("session cleared");

    Ok(())
}
