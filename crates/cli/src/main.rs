//! PartDesk CLI - Database migrations and catalog management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run catalog database migrations
//! partdesk migrate
//!
//! # Seed the catalog with demo data
//! partdesk seed
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the catalog with demo products, suppliers, and offers

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "partdesk")]
#[command(author, version, about = "PartDesk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run catalog database migrations
    Migrate,
    /// Seed the catalog with demo data
    Seed,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "partdesk_cli=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed => commands::seed::run().await,
    };

    if let Err(err) = result {
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}
