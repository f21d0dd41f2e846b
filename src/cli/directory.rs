//! Directory inspection commands.

use clap::{Args, Subcommand};

use crate::{
    config::DirectoryConfig,
    context::directory_provider,
    directory::{DirectoryProvider as _, Role},
};

#[derive(Debug, Args)]
pub(crate) struct DirectoryCommand {
    #[command(subcommand)]
    command: DirectorySubcommand,
}

#[derive(Debug, Subcommand)]
enum DirectorySubcommand {
    /// Fetch the directory and report what it contains.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    directory: DirectoryConfig,
}

pub(crate) async fn run(command: DirectoryCommand) -> Result<(), String> {
    match command.command {
        DirectorySubcommand::Check(args) => check(args).await,
    }
}

async fn check(args: CheckArgs) -> Result<(), String> {
    let directory = directory_provider(&args.directory.source)
        .load()
        .await
        .map_err(|error| format!("directory unavailable: {error}"))?;

    let active = directory.users.iter().filter(|user| user.is_active).count();

    println!("users: {} ({active} active)", directory.users.len());

    for role in [Role::Staff, Role::Admin, Role::SuperAdmin] {
        let count = directory.users.iter().filter(|user| user.role == role).count();
        let granted = directory.permissions.granted_count(role);

        println!("{role}: {count} accounts, {granted} capabilities granted");
    }

    Ok(())
}
