//! Operator CLI.

use clap::{Parser, Subcommand};

use crate::{config::LoggingConfig, observability};

mod directory;
mod login;
mod recover;
mod session;

/// Tombola admin console command-line interface.
#[derive(Debug, Parser)]
#[command(name = "tombola-admin", about = "Tombola Admin Console", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    logging: LoggingConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Directory(directory::DirectoryCommand),
    Login(login::LoginArgs),
    Recover(recover::RecoverArgs),
    Session(session::SessionCommand),
}

impl Cli {
    /// Dispatch the parsed command.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message when the command fails.
    pub async fn run(self) -> Result<(), String> {
        observability::init_subscriber(&self.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        match self.command {
            Commands::Directory(command) => directory::run(command).await,
            Commands::Login(args) => login::run(args).await,
            Commands::Recover(args) => recover::run(args).await,
            Commands::Session(command) => session::run(command),
        }
    }
}
