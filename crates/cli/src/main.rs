//! ShopHub CLI - record store seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the record store with the demo catalog and admin account
//! shophub seed
//!
//! # Wipe every collection
//! shophub reset
//! ```
//!
//! # Commands
//!
//! - `seed` - Populate the demo catalog and admin user (skips non-empty collections)
//! - `reset` - Remove all collections from the record store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shophub")]
#[command(author, version, about = "ShopHub CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the record store with the demo catalog and admin account
    Seed,
    /// Remove all collections from the record store
    Reset,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(&cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed => commands::seed::run()?,
        Commands::Reset => commands::reset::run()?,
    }
    Ok(())
}
