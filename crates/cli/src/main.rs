//! Site CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! site-cli migrate
//!
//! # Create the admin account, or reset its password
//! site-cli admin upsert -u admin -p 'a-long-password'
//!
//! # Print an Argon2 hash for a password
//! site-cli admin hash-password 'a-long-password'
//!
//! # Insert default pricing plans and projects into empty tables
//! site-cli seed
//!
//! # Delete every pricing plan
//! site-cli pricing reset
//!
//! # Show row counts
//! site-cli status
//! ```
//!
//! All commands read `DATABASE_URL` (default `sqlite://sqlite.db`), honouring
//! a `.env` file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "site-cli")]
#[command(author, version, about = "Site content backend CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed default pricing plans and projects
    Seed,
    /// Manage pricing plans
    Pricing {
        #[command(subcommand)]
        action: PricingAction,
    },
    /// Show row counts per table
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create an admin, or replace the password of an existing one
    Upsert {
        /// Admin username
        #[arg(short, long, default_value = "admin")]
        username: String,

        /// New password
        #[arg(short, long)]
        password: String,
    },
    /// Print an Argon2 hash for a password
    HashPassword {
        /// Password to hash
        password: String,
    },
}

#[derive(Subcommand)]
enum PricingAction {
    /// Delete every pricing plan
    Reset,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
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
            AdminAction::Upsert { username, password } => {
                commands::admin::upsert(&username, &password).await?;
            }
            AdminAction::HashPassword { password } => {
                commands::admin::hash_password(&password)?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
        Commands::Pricing { action } => match action {
            PricingAction::Reset => commands::pricing::reset().await?,
        },
        Commands::Status => commands::status::run().await?,
    }
    Ok(())
}
