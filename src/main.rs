//! Tombola Admin Console CLI

use std::process;

use clap::Parser;
use tombola_admin::cli::Cli;

#[tokio::main]
async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = cli.run().await {
        eprintln!("{error}");
        process::exit(1);
    }
}
