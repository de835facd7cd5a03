//! Database migration command.
//!
//! Migrations live in `crates/server/migrations/` and are embedded into the
//! server library, so this binary always applies the schema it was built with.

use site_server::db;

use super::{CommandError, connect};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!(
        available = db::MIGRATOR.iter().count(),
        "Running migrations..."
    );
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
