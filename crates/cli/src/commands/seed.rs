//! Seed default content.

use site_server::db::seed;

use super::{CommandError, connect};

/// Insert the default pricing plans and projects into empty tables.
///
/// # Errors
///
/// Returns an error if the database cannot be read or written.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;
    let report = seed::seed_defaults(&pool).await?;

    if report.pricing_inserted > 0 {
        tracing::info!(count = report.pricing_inserted, "Pricing data seeded");
    } else {
        tracing::info!("Pricing data already exists, skipping");
    }

    if report.projects_inserted > 0 {
        tracing::info!(count = report.projects_inserted, "Projects data seeded");
    } else {
        tracing::info!("Projects data already exists, skipping");
    }

    Ok(())
}
