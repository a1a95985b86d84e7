//! Ila Beauty CLI - schema setup and operator tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the key-value and session tables
//! ila-cli migrate
//!
//! # Create an admin account
//! ila-cli admin create -e admin@example.com -p 'a long password'
//!
//! # Load the starter catalog
//! ila-cli seed catalog
//! ```
//!
//! Every command reads the same environment as the storefront binary
//! (`STOREFRONT_DATABASE_URL`, `HOSTED_BACKEND_URL`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ila-cli")]
#[command(author, version, about = "Ila Beauty CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create database tables (PostgreSQL backend only)
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Load starter data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password (at least 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Starter categories and products
    Catalog {
        /// Seed even if the store already has categories
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Create { email, password } => {
                commands::admin::create(&email, &password).await?;
            }
        },
        Commands::Seed { target } => match target {
            SeedTarget::Catalog { force } => commands::seed::catalog(force).await?,
        },
    }
    Ok(())
}
